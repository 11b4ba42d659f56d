/// How a driver hands back the key it generated for an insert.
#[derive(Debug, Clone, Copy)]
pub enum KeyFetch {
    /// Append `RETURNING id` to the insert and read the key from its row.
    Returning,
    /// Read the connection-local last-insert id off the query result.
    LastInsertId,
}

/// Driver-specific SQL surface the gateway cannot express portably:
/// bind-placeholder syntax and generated-key retrieval.
pub trait Dialect: sqlx::Database {
    const KEY_FETCH: KeyFetch;

    /// Placeholder text for the 1-based bind position.
    fn placeholder(position: usize) -> String;

    fn last_insert_id(done: &Self::QueryResult) -> Option<i64>;
}

impl Dialect for sqlx::Postgres {
    const KEY_FETCH: KeyFetch = KeyFetch::Returning;

    fn placeholder(position: usize) -> String {
        format!("${position}")
    }

    fn last_insert_id(_done: &Self::QueryResult) -> Option<i64> {
        None
    }
}

impl Dialect for sqlx::Sqlite {
    const KEY_FETCH: KeyFetch = KeyFetch::LastInsertId;

    fn placeholder(_position: usize) -> String {
        "?".into()
    }

    fn last_insert_id(done: &Self::QueryResult) -> Option<i64> {
        Some(done.last_insert_rowid())
    }
}

impl Dialect for sqlx::MySql {
    const KEY_FETCH: KeyFetch = KeyFetch::LastInsertId;

    fn placeholder(_position: usize) -> String {
        "?".into()
    }

    fn last_insert_id(done: &Self::QueryResult) -> Option<i64> {
        Some(done.last_insert_id() as i64)
    }
}
