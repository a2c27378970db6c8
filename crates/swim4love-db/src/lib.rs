//! Swimmer persistence for the Swim4Love lap tracker.
//!
//! # Modules
//!
//! - [`store`] -- the [`SwimmerStore`] trait handlers are written against
//! - [`swimmer_store`] -- `PostgreSQL` implementation
//! - [`memory`] -- in-memory implementation for tests and local runs
//! - [`postgres`] -- connection pool, configuration, schema bootstrap
//! - [`error`] -- shared error type

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;
pub mod swimmer_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use memory::InMemorySwimmerStore;
pub use postgres::{PostgresConfig, PostgresPool};
pub use store::SwimmerStore;
pub use swimmer_store::{PgSwimmerStore, SwimmerRow};
