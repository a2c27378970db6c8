//! Shared application state for the Axum server.
//!
//! Everything a handler needs is injected here at startup: the swimmer
//! store, the avatar directory, the live leaderboard, and the page
//! templates. Nothing is reached through globals.

use std::sync::Arc;

use swim4love_db::SwimmerStore;

use crate::avatar::AvatarStore;
use crate::leaderboard::Leaderboard;
use crate::pages::Pages;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Swimmer persistence.
    pub store: Arc<dyn SwimmerStore>,
    /// Avatar images on disk.
    pub avatars: AvatarStore,
    /// Current standings and the update broadcast.
    pub leaderboard: Arc<Leaderboard>,
    /// Rendered HTML pages.
    pub pages: Arc<Pages>,
}

impl AppState {
    /// Assemble the state from its parts.
    pub fn new(
        store: Arc<dyn SwimmerStore>,
        avatars: AvatarStore,
        leaderboard: Arc<Leaderboard>,
        pages: Pages,
    ) -> Self {
        Self {
            store,
            avatars,
            leaderboard,
            pages: Arc::new(pages),
        }
    }
}
