//! The swimmer record and its creation payload.

use serde::{Deserialize, Serialize};

use crate::ids::SwimmerId;

/// A registered swimmer and the number of laps counted so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swimmer {
    /// Cap number, unique across the event.
    pub id: SwimmerId,
    /// Display name shown on the leaderboard.
    pub name: String,
    /// Laps completed.
    pub laps: u32,
}

impl Swimmer {
    /// Whether `self` is a later observation of the same swimmer than `other`.
    ///
    /// Lap counts only grow, so the record with more laps is the newer one.
    pub fn supersedes(&self, other: &Self) -> bool {
        self.id == other.id && self.laps >= other.laps
    }
}

/// Validated input for registering a swimmer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSwimmer {
    id: SwimmerId,
    name: String,
}

impl NewSwimmer {
    /// Build a registration, trimming the name.
    ///
    /// Returns `None` if the name is blank.
    pub fn new(id: SwimmerId, name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            id,
            name: name.to_owned(),
        })
    }

    /// The requested swimmer id.
    pub const fn id(&self) -> SwimmerId {
        self.id
    }

    /// The trimmed, non-empty name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The record this registration creates: zero laps.
    pub fn into_swimmer(self) -> Swimmer {
        Swimmer {
            id: self.id,
            name: self.name,
            laps: 0,
        }
    }
}
