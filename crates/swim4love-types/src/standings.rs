//! Leaderboard standings and the messages pushed to viewers.

use serde::{Deserialize, Serialize};

use crate::swimmer::Swimmer;

/// Every swimmer's standing at one point in time.
///
/// Swimmers are ordered by laps (most first), ties broken by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    /// Ranked swimmers.
    pub swimmers: Vec<Swimmer>,
    /// Sum of all laps swum.
    pub total_laps: u64,
}

impl Standings {
    /// Rank the given swimmers.
    pub fn from_swimmers(mut swimmers: Vec<Swimmer>) -> Self {
        swimmers.sort_by(|a, b| b.laps.cmp(&a.laps).then(a.id.cmp(&b.id)));
        let total_laps = swimmers
            .iter()
            .fold(0_u64, |acc, s| acc.saturating_add(u64::from(s.laps)));
        Self {
            swimmers,
            total_laps,
        }
    }

    /// Number of registered swimmers.
    pub fn len(&self) -> usize {
        self.swimmers.len()
    }

    /// `true` if nobody is registered yet.
    pub fn is_empty(&self) -> bool {
        self.swimmers.is_empty()
    }
}

/// A message on the leaderboard channel.
///
/// Serialized as `{"event": "<name>", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ChannelEvent {
    /// Full standings, sent once to a viewer when it connects.
    Init(Standings),
    /// One swimmer changed (registered or swam a lap).
    Update(Swimmer),
}
