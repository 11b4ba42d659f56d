use chrono::{DateTime, Utc};
use rowgate::db::{Dialect, TableRecord};
use sqlx::Arguments;
use sqlx::error::BoxDynError;
use uuid::Uuid;

use crate::entity::{Contact, Status};

/// Insert statement the contact gateway is constructed with. Placeholder
/// order must match [`TableRecord::bind_insert`].
pub fn insert_contact_sql<DB: Dialect>() -> String {
    format!(
        "INSERT INTO contacts (uid, name, email, status, created_at, \
         updated_at) VALUES ({}, {}, {}, {}, {}, {})",
        DB::placeholder(1),
        DB::placeholder(2),
        DB::placeholder(3),
        DB::placeholder(4),
        DB::placeholder(5),
        DB::placeholder(6),
    )
}

/// Update statement the contact gateway is constructed with. Placeholder
/// order must match [`TableRecord::bind_update`].
pub fn update_contact_sql<DB: Dialect>() -> String {
    format!(
        "UPDATE contacts SET name = {}, email = {}, status = {}, \
         updated_at = {} WHERE id = {}",
        DB::placeholder(1),
        DB::placeholder(2),
        DB::placeholder(3),
        DB::placeholder(4),
        DB::placeholder(5),
    )
}

impl<DB> TableRecord<DB> for Contact
where
    DB: Dialect,
    String: sqlx::Type<DB> + for<'q> sqlx::Encode<'q, DB>,
    i64: sqlx::Type<DB> + for<'q> sqlx::Encode<'q, DB>,
    Uuid: sqlx::Type<DB> + for<'q> sqlx::Encode<'q, DB>,
    Status: sqlx::Type<DB> + for<'q> sqlx::Encode<'q, DB>,
    DateTime<Utc>: sqlx::Type<DB> + for<'q> sqlx::Encode<'q, DB>,
{
    fn table() -> &'static str {
        "contacts"
    }

    fn bind_insert<'q>(
        &'q self,
        args: &mut DB::Arguments<'q>,
    ) -> Result<(), BoxDynError> {
        args.add(self.uid)?;
        args.add(self.name.clone())?;
        args.add(self.email.clone())?;
        args.add(self.status.clone())?;
        args.add(self.created_at)?;
        args.add(self.updated_at)
    }

    fn bind_update<'q>(
        &'q self,
        args: &mut DB::Arguments<'q>,
    ) -> Result<(), BoxDynError> {
        args.add(self.name.clone())?;
        args.add(self.email.clone())?;
        args.add(self.status.clone())?;
        args.add(self.updated_at)?;
        args.add(self.id)
    }
}
