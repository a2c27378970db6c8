//! `WebSocket` channel for leaderboard viewers.
//!
//! Clients connect to `GET /ws`. On connect the server pushes one `init`
//! event with the full standings to that client only, then forwards every
//! `update` event the leaderboard broadcasts. A viewer that falls behind
//! skips the lagged updates and carries on from the newest.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use swim4love_types::{ChannelEvent, ViewerId};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::leaderboard::SnapshotProvider;
use crate::state::AppState;

/// Route of the leaderboard channel.
pub const WS_PATH: &str = "/ws";

/// What a freshly connected viewer starts with.
#[derive(Debug)]
pub struct ViewerSession {
    /// Identifier used in logs.
    pub viewer: ViewerId,
    /// The `init` event to send, or `None` if the snapshot failed.
    pub init: Option<ChannelEvent>,
    /// Subsequent leaderboard updates.
    pub updates: broadcast::Receiver<ChannelEvent>,
}

/// Connection-open callback for the leaderboard channel.
///
/// `updates` must be subscribed before this is called so that no change
/// can fall between the subscription and the snapshot. Nothing is
/// published to the other viewers. A snapshot failure is logged and leaves
/// `init` empty; the connection is kept.
pub async fn connect_viewer(
    provider: &dyn SnapshotProvider,
    updates: broadcast::Receiver<ChannelEvent>,
) -> ViewerSession {
    let viewer = ViewerId::new();
    info!(%viewer, "New leaderboard connection");

    let init = match provider.snapshot().await {
        Ok(standings) => Some(ChannelEvent::Init(standings)),
        Err(e) => {
            error!(%viewer, error = %e, "Failed to build leaderboard snapshot");
            None
        }
    };

    ViewerSession {
        viewer,
        init,
        updates,
    }
}

/// Upgrade an HTTP request to a `WebSocket` connection.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_leaderboard(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Serialize `event` and send it as a text frame.
///
/// Returns `false` if the client is gone.
async fn send_event(socket: &mut WebSocket, viewer: ViewerId, event: &ChannelEvent) -> bool {
    let json = match serde_json::to_string(event) {
        Ok(j) => j,
        Err(e) => {
            warn!(%viewer, "Failed to serialize channel event: {e}");
            return true;
        }
    };
    socket.send(Message::Text(json.into())).await.is_ok()
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let session = connect_viewer(state.leaderboard.as_ref(), state.leaderboard.subscribe()).await;
    let ViewerSession {
        viewer,
        init,
        updates: mut rx,
    } = session;

    if let Some(init) = init {
        if !send_event(&mut socket, viewer, &init).await {
            // A failed push is logged; the loop below notices if the
            // client is really gone.
            error!(%viewer, "Failed to push leaderboard snapshot");
        }
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        if !send_event(&mut socket, viewer, &event).await {
                            debug!(%viewer, "Viewer disconnected (send failed)");
                            return;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        debug!(%viewer, skipped = n, "Viewer lagged, skipping ahead");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!(%viewer, "Leaderboard channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        info!(%viewer, "Leaderboard connection closed");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!(%viewer, "Viewer disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(%viewer, "WebSocket error: {e}");
                        return;
                    }
                    _ => {
                        // Viewers are read-only; ignore text and binary frames.
                    }
                }
            }
        }
    }
}
