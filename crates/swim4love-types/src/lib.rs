//! Shared type definitions for the Swim4Love lap tracker.
//!
//! Everything that crosses a crate boundary lives here: swimmer ids and
//! their validation rule, the swimmer record, and the standings pushed to
//! leaderboard viewers.

pub mod ids;
pub mod standings;
pub mod swimmer;

pub use ids::{IdError, MAX_ID_DIGITS, SwimmerId, ViewerId, is_valid_id};
pub use standings::{ChannelEvent, Standings};
pub use swimmer::{NewSwimmer, Swimmer};
