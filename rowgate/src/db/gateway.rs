use std::marker::PhantomData;

use sqlx::Arguments;

use crate::db::{
    Dialect, Handle, KeyFetch, TableRecord, bind_err, map_err,
};

/// Generic CRUD gateway over one table for one record type.
///
/// A gateway checks one connection out of the process-wide pool at
/// construction and keeps it until [`close`](Gateway::close). The id and
/// all-rows query texts are fixed at construction from the record's table
/// name; the insert and update texts are supplied by the caller. None of the
/// six statements change afterwards.
///
/// Every operation takes `&mut self`, so one gateway serves one caller at a
/// time by construction.
pub struct Gateway<T, DB>
where
    DB: Dialect,
    for<'e> &'e mut DB::Connection: sqlx::Executor<'e, Database = DB>,
{
    handle: Handle<'static, DB>,
    find_sql: String,
    find_all_sql: String,
    insert_sql: String,
    update_sql: String,
    delete_sql: String,
    clean_sql: String,
    _record: PhantomData<T>,
}

impl<T, DB> Gateway<T, DB>
where
    DB: Dialect,
    for<'e> &'e mut DB::Connection: sqlx::Executor<'e, Database = DB>,
    for<'q> DB::Arguments<'q>: sqlx::IntoArguments<'q, DB>,
    T: TableRecord<DB> + for<'r> sqlx::FromRow<'r, DB::Row> + Send + Unpin,
    i64: sqlx::Type<DB>
        + for<'q> sqlx::Encode<'q, DB>
        + for<'r> sqlx::Decode<'r, DB>,
    usize: sqlx::ColumnIndex<DB::Row>,
{
    /// Checks a dedicated connection out of `pool` and fixes the statement
    /// texts. Fails if the pool cannot hand out a connection.
    pub async fn connect(
        pool: &sqlx::Pool<DB>,
        insert_sql: impl Into<String>,
        update_sql: impl Into<String>,
    ) -> crate::Result<Self> {
        let conn = pool.acquire().await.map_err(map_err)?;
        let table = T::table();
        tracing::debug!(table, "gateway connected");
        Ok(Self {
            handle: Handle::Connection(conn),
            find_sql: format!(
                "SELECT * FROM {table} WHERE id = {}",
                DB::placeholder(1)
            ),
            find_all_sql: format!("SELECT * FROM {table}"),
            insert_sql: insert_sql.into(),
            update_sql: update_sql.into(),
            delete_sql: format!(
                "DELETE FROM {table} WHERE id = {}",
                DB::placeholder(1)
            ),
            clean_sql: format!("DELETE FROM {table}"),
            _record: PhantomData,
        })
    }

    /// Looks a record up by primary key. More than one row for an id means
    /// the table violates the key convention and is reported as such rather
    /// than silently keeping the last row.
    pub async fn find_by_id(&mut self, id: i64) -> crate::Result<Option<T>> {
        let mut args: DB::Arguments<'_> = Default::default();
        args.add(id).map_err(bind_err)?;
        let mut rows: Vec<T> = sqlx::query_as_with(&self.find_sql, args)
            .fetch_all(self.handle.executor())
            .await
            .map_err(map_err)?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(crate::Error::Integrity(format!(
                "{n} rows share id {id} in {}",
                T::table()
            ))),
        }
    }

    /// Every row of the table, in result-set order.
    pub async fn find_all(&mut self) -> crate::Result<Vec<T>> {
        sqlx::query_as(&self.find_all_sql)
            .fetch_all(self.handle.executor())
            .await
            .map_err(map_err)
    }

    /// Inserts `record`, then re-fetches the stored row under the key the
    /// database generated. A missing generated key falls through to the
    /// `-1` sentinel, which the re-fetch reports as not found.
    pub async fn persist(&mut self, record: &T) -> crate::Result<T> {
        let sql = format!("{} RETURNING id", self.insert_sql);
        let mut args: DB::Arguments<'_> = Default::default();
        record.bind_insert(&mut args).map_err(bind_err)?;
        let id = match DB::KEY_FETCH {
            KeyFetch::Returning => {
                sqlx::query_scalar_with::<DB, i64, _>(&sql, args)
                    .fetch_optional(self.handle.executor())
                    .await
                    .map_err(map_err)?
                    .unwrap_or(-1)
            }
            KeyFetch::LastInsertId => {
                let done = sqlx::query_with(&self.insert_sql, args)
                    .execute(self.handle.executor())
                    .await
                    .map_err(map_err)?;
                DB::last_insert_id(&done).unwrap_or(-1)
            }
        };
        tracing::debug!(table = T::table(), id, "generated key");
        self.find_by_id(id).await?.ok_or_else(|| {
            crate::Error::NotFound(format!("{} row {id}", T::table()))
        })
    }

    /// Runs the caller-supplied update statement with this record's values.
    pub async fn update(&mut self, record: &T) -> crate::Result<()> {
        let mut args: DB::Arguments<'_> = Default::default();
        record.bind_update(&mut args).map_err(bind_err)?;
        sqlx::query_with(&self.update_sql, args)
            .execute(self.handle.executor())
            .await
            .map_err(map_err)?;
        Ok(())
    }

    /// Deletes the row with this primary key, if any.
    pub async fn remove(&mut self, id: i64) -> crate::Result<()> {
        let mut args: DB::Arguments<'_> = Default::default();
        args.add(id).map_err(bind_err)?;
        sqlx::query_with(&self.delete_sql, args)
            .execute(self.handle.executor())
            .await
            .map_err(map_err)?;
        Ok(())
    }

    /// Deletes every row of the table.
    pub async fn clean(&mut self) -> crate::Result<()> {
        sqlx::query(&self.clean_sql)
            .execute(self.handle.executor())
            .await
            .map_err(map_err)?;
        Ok(())
    }

    /// Closes the owned connection. The gateway is unusable afterwards,
    /// which the move makes explicit.
    pub async fn close(self) -> crate::Result<()> {
        self.handle.close().await
    }
}
