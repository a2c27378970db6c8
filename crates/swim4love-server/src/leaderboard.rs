//! The live leaderboard: current standings plus the update fan-out.
//!
//! [`Leaderboard`] keeps every swimmer's latest record in memory. It is
//! seeded from the store at startup, and handlers feed it each record they
//! write. New viewers read a snapshot from it through the
//! [`SnapshotProvider`] capability; connected viewers receive accepted
//! changes over a [`broadcast`] channel.

use std::collections::BTreeMap;

use async_trait::async_trait;
use swim4love_db::{DbError, SwimmerStore};
use swim4love_types::{ChannelEvent, Standings, Swimmer, SwimmerId};
use tokio::sync::{RwLock, broadcast};

/// Capacity of the broadcast channel for leaderboard updates.
///
/// A viewer that falls more than this many updates behind receives
/// [`broadcast::error::RecvError::Lagged`] and skips to the newest one.
const BROADCAST_CAPACITY: usize = 256;

/// Something that can produce the current standings.
#[async_trait]
pub trait SnapshotProvider: Send + Sync + 'static {
    /// The standings right now.
    async fn snapshot(&self) -> Result<Standings, DbError>;
}

/// In-memory standings with a broadcast channel for changes.
#[derive(Debug)]
pub struct Leaderboard {
    swimmers: RwLock<BTreeMap<SwimmerId, Swimmer>>,
    tx: broadcast::Sender<ChannelEvent>,
}

impl Leaderboard {
    /// Create an empty leaderboard.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            swimmers: RwLock::new(BTreeMap::new()),
            tx,
        }
    }

    /// Create a leaderboard seeded with every swimmer in `store`.
    ///
    /// # Errors
    ///
    /// Returns the store error if listing swimmers fails.
    pub async fn load(store: &dyn SwimmerStore) -> Result<Self, DbError> {
        let board = Self::new();
        let swimmers = store.list().await?;
        let count = swimmers.len();
        {
            let mut map = board.swimmers.write().await;
            map.extend(swimmers.into_iter().map(|s| (s.id, s)));
        }
        tracing::info!(swimmers = count, "Leaderboard loaded");
        Ok(board)
    }

    /// Record a swimmer's latest state and broadcast it.
    ///
    /// A record with fewer laps than the one already held is ignored, so
    /// handlers finishing out of order never move a swimmer backwards.
    /// Returns `true` if the record was accepted.
    pub async fn record(&self, swimmer: Swimmer) -> bool {
        let mut map = self.swimmers.write().await;
        if let Some(current) = map.get(&swimmer.id) {
            if !swimmer.supersedes(current) {
                tracing::debug!(
                    swimmer_id = %swimmer.id,
                    laps = swimmer.laps,
                    held = current.laps,
                    "Ignoring stale leaderboard record"
                );
                return false;
            }
        }
        map.insert(swimmer.id, swimmer.clone());

        // Sent under the write lock so viewers see updates in the order
        // they were accepted. `send` fails only when nobody is listening.
        let receivers = self.tx.send(ChannelEvent::Update(swimmer)).unwrap_or(0);
        drop(map);
        tracing::trace!(receivers, "Leaderboard update broadcast");
        true
    }

    /// Subscribe to leaderboard updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ChannelEvent> {
        self.tx.subscribe()
    }

    /// Number of connected update subscribers.
    pub fn viewer_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Number of swimmers on the board.
    pub async fn len(&self) -> usize {
        self.swimmers.read().await.len()
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotProvider for Leaderboard {
    async fn snapshot(&self) -> Result<Standings, DbError> {
        let swimmers = self.swimmers.read().await.values().cloned().collect();
        Ok(Standings::from_swimmers(swimmers))
    }
}
