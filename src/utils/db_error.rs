//! Helpers for classifying database errors.

/// Name of the unique index guarding `url_maps.short_code`.
pub const SHORT_CODE_INDEX: &str = "ix_url_maps_short_code";

/// Returns true if `e` is a unique-constraint violation on the short code.
///
/// SQLite does not report constraint names, so the error message
/// (`UNIQUE constraint failed: url_maps.short_code`) is checked as well.
pub fn is_unique_violation_on_short_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(SHORT_CODE_INDEX) || db_err.message().contains("url_maps.short_code")
}
