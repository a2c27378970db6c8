//! HTTP server for the Swim4Love lap tracker.
//!
//! This crate provides an Axum server that exposes:
//!
//! - **Swimmer API** -- avatar, info, add-lap and registration endpoints
//!   answering with the `{code, msg, data}` envelope
//! - **`WebSocket` endpoint** (`/ws`) that greets each new viewer with the
//!   full standings and then streams updates via [`tokio::sync::broadcast`]
//! - **HTML pages** for the leaderboard screen and the volunteer desk
//!
//! # Architecture
//!
//! Handlers get everything through [`AppState`]: a [`SwimmerStore`] trait
//! object, the [`AvatarStore`], the in-memory [`Leaderboard`] and the page
//! templates. Errors are [`ApiError`] values turned into envelopes at the
//! response boundary.
//!
//! [`SwimmerStore`]: swim4love_db::SwimmerStore
//! [`AvatarStore`]: avatar::AvatarStore
//! [`Leaderboard`]: leaderboard::Leaderboard
//! [`ApiError`]: error::ApiError

pub mod avatar;
pub mod config;
pub mod envelope;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod leaderboard;
pub mod lookup;
pub mod pages;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use config::{ConfigError, ServiceConfig};
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
