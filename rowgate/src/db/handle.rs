use futures_core::{future::BoxFuture, stream::BoxStream};

use sqlx::Acquire;
use sqlx::Connection;

/// One unit of database access: a shared pool, an open transaction, or a
/// dedicated connection checked out of the pool. A gateway holds the
/// `Connection` variant for its whole lifetime; the other variants serve
/// transactional callers and tests.
#[derive(Debug)]
pub enum Handle<'c, DB>
where
    DB: sqlx::Database,
    for<'e> &'e mut DB::Connection: sqlx::Executor<'e, Database = DB>,
{
    Pool(sqlx::Pool<DB>),
    Transaction(sqlx::Transaction<'c, DB>),
    Connection(sqlx::pool::PoolConnection<DB>),
}

impl<'c, DB> Handle<'c, DB>
where
    DB: sqlx::Database,
    for<'e> &'e mut DB::Connection: sqlx::Executor<'e, Database = DB>,
{
    pub async fn begin(&mut self) -> crate::Result<Handle<'_, DB>> {
        let tx = match self {
            Handle::Pool(pool) => pool.begin().await,
            Handle::Transaction(tx) => tx.begin().await,
            Handle::Connection(conn) => conn.begin().await,
        }
        .map_err(crate::db::map_err)?;
        Ok(Handle::Transaction(tx))
    }

    pub async fn commit(self) -> crate::Result<()> {
        match self {
            Handle::Pool(_) => Ok(()),
            Handle::Transaction(tx) => {
                tx.commit().await.map_err(crate::db::map_err)
            }
            Handle::Connection(_) => Ok(()),
        }
    }

    pub async fn rollback(self) -> crate::Result<()> {
        match self {
            Handle::Pool(_) => Ok(()),
            Handle::Transaction(tx) => {
                tx.rollback().await.map_err(crate::db::map_err)
            }
            Handle::Connection(_) => Ok(()),
        }
    }

    /// Releases whatever this handle holds. A dedicated connection is closed
    /// for good, an open transaction is rolled back, a pool is left running.
    pub async fn close(self) -> crate::Result<()> {
        match self {
            Handle::Pool(_) => Ok(()),
            Handle::Transaction(tx) => {
                tx.rollback().await.map_err(crate::db::map_err)
            }
            Handle::Connection(conn) => conn
                .detach()
                .close()
                .await
                .map_err(crate::db::map_err),
        }
    }

    /// Borrows this handle as something queries can execute against.
    pub fn executor<'h>(&'h mut self) -> HandleExecutor<'h, 'c, DB> {
        HandleExecutor { handle: self }
    }
}

/// Short-lived [`sqlx::Executor`] view over a [`Handle`], dispatching to
/// whichever variant the handle holds.
#[derive(Debug)]
pub struct HandleExecutor<'h, 'c, DB>
where
    DB: sqlx::Database,
    for<'e> &'e mut DB::Connection: sqlx::Executor<'e, Database = DB>,
{
    handle: &'h mut Handle<'c, DB>,
}

impl<'h, 'c, DB> sqlx::Executor<'h> for HandleExecutor<'h, 'c, DB>
where
    DB: sqlx::Database,
    for<'e> &'e mut DB::Connection: sqlx::Executor<'e, Database = DB>,
{
    type Database = DB;

    /// Execute multiple queries and return the generated results as a stream
    /// from each query, in a stream.
    fn fetch_many<'e, 'q: 'e, E>(
        self,
        query: E,
    ) -> BoxStream<
        'e,
        Result<
            sqlx::Either<
                <Self::Database as sqlx::Database>::QueryResult,
                <Self::Database as sqlx::Database>::Row,
            >,
            sqlx::Error,
        >,
    >
    where
        'c: 'e,
        'h: 'e,
        E: 'q + sqlx::Execute<'q, Self::Database>,
    {
        match self.handle {
            Handle::Pool(pool) => pool.fetch_many(query),
            Handle::Transaction(tx) => tx.fetch_many(query),
            Handle::Connection(conn) => conn.fetch_many(query),
        }
    }

    /// Execute the query and returns at most one row.
    fn fetch_optional<'e, 'q: 'e, E>(
        self,
        query: E,
    ) -> BoxFuture<
        'e,
        Result<Option<<Self::Database as sqlx::Database>::Row>, sqlx::Error>,
    >
    where
        'c: 'e,
        'h: 'e,
        E: 'q + sqlx::Execute<'q, Self::Database>,
    {
        match self.handle {
            Handle::Pool(pool) => pool.fetch_optional(query),
            Handle::Transaction(tx) => tx.fetch_optional(query),
            Handle::Connection(conn) => conn.fetch_optional(query),
        }
    }

    /// Prepare the SQL query, with parameter type information, to inspect the
    /// type information about its parameters and results.
    ///
    /// Only some database drivers (PostgreSQL, MSSQL) can take advantage of
    /// this extra information to influence parameter type inference.
    fn prepare_with<'e, 'q: 'e>(
        self,
        sql: &'q str,
        parameters: &'e [<Self::Database as sqlx::Database>::TypeInfo],
    ) -> BoxFuture<
        'e,
        Result<<Self::Database as sqlx::Database>::Statement<'q>, sqlx::Error>,
    >
    where
        'c: 'e,
        'h: 'e,
    {
        match self.handle {
            Handle::Pool(pool) => pool.prepare_with(sql, parameters),
            Handle::Transaction(tx) => tx.prepare_with(sql, parameters),
            Handle::Connection(conn) => conn.prepare_with(sql, parameters),
        }
    }

    fn describe<'e, 'q: 'e>(
        self,
        sql: &'q str,
    ) -> BoxFuture<'e, Result<sqlx::Describe<Self::Database>, sqlx::Error>>
    where
        'c: 'e,
        'h: 'e,
    {
        match self.handle {
            Handle::Pool(pool) => pool.describe(sql),
            Handle::Transaction(tx) => tx.describe(sql),
            Handle::Connection(conn) => conn.describe(sql),
        }
    }
}
