pub mod entries;
pub mod users;

/// True when the error is a UNIQUE constraint failure.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
