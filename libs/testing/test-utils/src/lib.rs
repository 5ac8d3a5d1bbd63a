//! Shared test infrastructure
//!
//! Provides `TestDatabase`, a PostgreSQL container with automatic cleanup,
//! for integration tests that need a real database.
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::TestDatabase;
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let manager_url = db.url();
//! # }
//! ```

mod postgres;

pub use postgres::TestDatabase;
