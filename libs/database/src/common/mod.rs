//! Common utilities shared across the database layer

pub mod error;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult};
pub use retry::RetryPolicy;
