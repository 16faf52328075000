
/// Student table CRUD tests
pub mod crud_tests;

/// Database tests run only when a database is configured and not explicitly skipped.
pub(crate) fn db_tests_enabled() -> bool {
    std::env::var("SKIP_DB_TESTS").is_err() && std::env::var("DATABASE_URL").is_ok()
}
