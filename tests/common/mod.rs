//! Common test utilities for API integration tests

#![allow(dead_code)]

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Lazily-connected pool for tests that never touch a live database: the
/// paths under test are answered before any connection is acquired.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://localhost/quill_test")
        .expect("valid connection string")
}
