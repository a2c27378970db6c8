//! Error types for the data layer.
//!
//! All store operations return [`DbError`], which wraps the underlying
//! [`sqlx`] error or names the rule a stored row broke.

use swim4love_types::SwimmerId;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A swimmer with this id is already registered.
    #[error("swimmer {0} already exists")]
    Duplicate(SwimmerId),

    /// A stored row does not satisfy the swimmer invariants.
    #[error("corrupt swimmer row: {0}")]
    Corrupt(String),

    /// A lap counter would overflow.
    #[error("lap counter overflow for swimmer {0}")]
    LapOverflow(SwimmerId),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
