//! The storage seam between HTTP handlers and the database.
//!
//! Handlers hold an `Arc<dyn SwimmerStore>` so the server can run against
//! `PostgreSQL` in production and against [`InMemorySwimmerStore`] in
//! tests or on a laptop without a database.
//!
//! [`InMemorySwimmerStore`]: crate::memory::InMemorySwimmerStore

use async_trait::async_trait;
use swim4love_types::{NewSwimmer, Swimmer, SwimmerId};

use crate::error::DbError;

/// Persistence operations on swimmers.
///
/// Every mutating call is atomic on its own: concurrent
/// [`increment_laps`](Self::increment_laps) calls for the same swimmer are
/// serialized by the implementation and never lose a lap.
#[async_trait]
pub trait SwimmerStore: Send + Sync + 'static {
    /// Fetch one swimmer.
    async fn get(&self, id: SwimmerId) -> Result<Option<Swimmer>, DbError>;

    /// Register a swimmer with zero laps.
    ///
    /// Returns [`DbError::Duplicate`] if the id is taken, including when a
    /// concurrent registration for the same id won the race.
    async fn insert(&self, swimmer: NewSwimmer) -> Result<Swimmer, DbError>;

    /// Add one lap and return the updated record, or `None` if no swimmer
    /// has this id.
    async fn increment_laps(&self, id: SwimmerId) -> Result<Option<Swimmer>, DbError>;

    /// All swimmers, in id order.
    async fn list(&self) -> Result<Vec<Swimmer>, DbError>;
}
