//! In-memory [`SwimmerStore`] used by tests and database-less local runs.
//!
//! A single mutex guards the whole map, which gives the same per-swimmer
//! linearizability the `PostgreSQL` row lock provides.

use std::collections::BTreeMap;

use async_trait::async_trait;
use swim4love_types::{NewSwimmer, Swimmer, SwimmerId};
use tokio::sync::Mutex;

use crate::error::DbError;
use crate::store::SwimmerStore;

/// Swimmers kept in a process-local map. Lost on restart.
#[derive(Debug, Default)]
pub struct InMemorySwimmerStore {
    swimmers: Mutex<BTreeMap<SwimmerId, Swimmer>>,
}

impl InMemorySwimmerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SwimmerStore for InMemorySwimmerStore {
    async fn get(&self, id: SwimmerId) -> Result<Option<Swimmer>, DbError> {
        Ok(self.swimmers.lock().await.get(&id).cloned())
    }

    async fn insert(&self, swimmer: NewSwimmer) -> Result<Swimmer, DbError> {
        let mut swimmers = self.swimmers.lock().await;
        let id = swimmer.id();
        if swimmers.contains_key(&id) {
            return Err(DbError::Duplicate(id));
        }
        let record = swimmer.into_swimmer();
        swimmers.insert(id, record.clone());
        Ok(record)
    }

    async fn increment_laps(&self, id: SwimmerId) -> Result<Option<Swimmer>, DbError> {
        let mut swimmers = self.swimmers.lock().await;
        let Some(swimmer) = swimmers.get_mut(&id) else {
            return Ok(None);
        };
        swimmer.laps = swimmer
            .laps
            .checked_add(1)
            .ok_or(DbError::LapOverflow(id))?;
        Ok(Some(swimmer.clone()))
    }

    async fn list(&self) -> Result<Vec<Swimmer>, DbError> {
        Ok(self.swimmers.lock().await.values().cloned().collect())
    }
}
