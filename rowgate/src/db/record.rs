use sqlx::error::BoxDynError;

/// Per-table capabilities a record type supplies to the gateway: the table
/// it lives in, and how its values bind onto the caller-supplied insert and
/// update statements. Row construction goes through the record's
/// [`sqlx::FromRow`] implementation at the call sites.
///
/// Binding happens per call, on arguments owned by that call. Nothing is
/// shared between executions.
pub trait TableRecord<DB: sqlx::Database>: Sized {
    /// Table this record maps to. Trusted text, interpolated unescaped into
    /// the derived statements.
    fn table() -> &'static str;

    /// Binds the values for one execution of the insert statement, in the
    /// statement's placeholder order.
    fn bind_insert<'q>(
        &'q self,
        args: &mut DB::Arguments<'q>,
    ) -> Result<(), BoxDynError>;

    /// Binds the values for one execution of the update statement, in the
    /// statement's placeholder order.
    fn bind_update<'q>(
        &'q self,
        args: &mut DB::Arguments<'q>,
    ) -> Result<(), BoxDynError>;
}
