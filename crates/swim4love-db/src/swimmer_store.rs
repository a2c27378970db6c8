//! `PostgreSQL` implementation of [`SwimmerStore`].
//!
//! Lap increments are a single `UPDATE ... SET laps = laps + 1`, so the
//! row lock taken by `PostgreSQL` serializes concurrent increments for the
//! same swimmer. Registration uses `ON CONFLICT (id) DO NOTHING` and treats
//! "no row returned" as a duplicate, which closes the gap between the
//! handler's existence check and the insert.

use async_trait::async_trait;
use sqlx::PgPool;
use swim4love_types::{NewSwimmer, Swimmer, SwimmerId};

use crate::error::DbError;
use crate::store::SwimmerStore;

/// A row from the `swimmers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SwimmerRow {
    /// Primary key.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Lap counter.
    pub laps: i32,
}

impl TryFrom<SwimmerRow> for Swimmer {
    type Error = DbError;

    fn try_from(row: SwimmerRow) -> Result<Self, Self::Error> {
        let id = SwimmerId::new(row.id)
            .ok_or_else(|| DbError::Corrupt(format!("non-positive id {}", row.id)))?;
        let laps = u32::try_from(row.laps).map_err(|_e| {
            DbError::Corrupt(format!("negative laps {} for swimmer {id}", row.laps))
        })?;
        Ok(Self {
            id,
            name: row.name,
            laps,
        })
    }
}

/// Operations on the `swimmers` table.
#[derive(Clone)]
pub struct PgSwimmerStore {
    pool: PgPool,
}

impl PgSwimmerStore {
    /// Create a store bound to a connection pool.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SwimmerStore for PgSwimmerStore {
    async fn get(&self, id: SwimmerId) -> Result<Option<Swimmer>, DbError> {
        let row = sqlx::query_as::<_, SwimmerRow>(
            r"SELECT id, name, laps FROM swimmers WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Swimmer::try_from).transpose()
    }

    async fn insert(&self, swimmer: NewSwimmer) -> Result<Swimmer, DbError> {
        let id = swimmer.id();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, SwimmerRow>(
            r"INSERT INTO swimmers (id, name, laps)
              VALUES ($1, $2, 0)
              ON CONFLICT (id) DO NOTHING
              RETURNING id, name, laps",
        )
        .bind(id.into_inner())
        .bind(swimmer.name())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Err(DbError::Duplicate(id));
        };

        tx.commit().await?;
        tracing::debug!(swimmer_id = %id, "Inserted swimmer");
        Swimmer::try_from(row)
    }

    async fn increment_laps(&self, id: SwimmerId) -> Result<Option<Swimmer>, DbError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, SwimmerRow>(
            r"UPDATE swimmers SET laps = laps + 1
              WHERE id = $1
              RETURNING id, name, laps",
        )
        .bind(id.into_inner())
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        let swimmer = row.map(Swimmer::try_from).transpose()?;
        if let Some(s) = &swimmer {
            tracing::debug!(swimmer_id = %id, laps = s.laps, "Incremented laps");
        }
        Ok(swimmer)
    }

    async fn list(&self) -> Result<Vec<Swimmer>, DbError> {
        let rows = sqlx::query_as::<_, SwimmerRow>(
            r"SELECT id, name, laps FROM swimmers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Swimmer::try_from).collect()
    }
}
