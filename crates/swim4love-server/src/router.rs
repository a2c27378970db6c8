//! Axum router construction.
//!
//! Assembles the swimmer API, the HTML pages and the leaderboard
//! `WebSocket` into a single [`Router`].

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::pages;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /swimmer/avatar/{id}` -- avatar image
/// - `GET /swimmer/info/{id}` -- swimmer data
/// - `POST /swimmer/add-lap` -- count a lap
/// - `POST /swimmer/add` -- register a swimmer (body limit `max_upload_bytes`)
/// - `GET /leaderboard`, `GET /volunteer` -- HTML pages
/// - `GET /achievement/{id}`, `GET /certificate/{id}` -- 404 stubs
/// - `GET /ws` -- leaderboard channel
/// - `GET /health` -- liveness
///
/// CORS allows any origin so the leaderboard can be shown from another host.
pub fn build_router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swimmer API
        .route("/swimmer/avatar/{id}", get(handlers::get_avatar))
        .route("/swimmer/info/{id}", get(handlers::get_info))
        .route("/swimmer/add-lap", post(handlers::add_lap))
        .route(
            "/swimmer/add",
            post(handlers::add_swimmer).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        // Pages
        .route("/leaderboard", get(pages::leaderboard_page))
        .route("/volunteer", get(pages::volunteer_page))
        .route("/achievement/{id}", get(pages::achievement_page))
        .route("/certificate/{id}", get(pages::certificate_page))
        // WebSocket
        .route(ws::WS_PATH, get(ws::ws_leaderboard))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
