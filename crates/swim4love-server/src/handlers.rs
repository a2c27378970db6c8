//! REST API endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/swimmer/avatar/{id}` | Avatar image (default if none uploaded) |
//! | `GET` | `/swimmer/info/{id}` | Swimmer id, name and laps |
//! | `POST` | `/swimmer/add-lap` | Count one lap (form: `id`) |
//! | `POST` | `/swimmer/add` | Register a swimmer (form: `id`, `name`, file `avatar`) |
//! | `GET` | `/health` | Liveness plus swimmer count |
//!
//! Every id-taking endpoint validates and resolves the id through
//! [`find_swimmer`] before doing anything else.

use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::response::{IntoResponse, Response};
use swim4love_types::Swimmer;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{debug, info, warn};

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::forms::{AddLapForm, AddSwimmerForm};
use crate::lookup::find_swimmer;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /swimmer/avatar/{id}
// ---------------------------------------------------------------------------

/// Serve the swimmer's avatar, or the default image if none was uploaded.
///
/// The file is streamed by [`ServeFile`], which sets the content type and
/// answers conditional requests.
pub async fn get_avatar(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    request: Request,
) -> Result<Response, ApiError> {
    let swimmer = find_swimmer(state.store.as_ref(), Some(&raw_id)).await?;

    let path = state
        .avatars
        .resolve(swimmer.id)
        .await
        .map_err(|e| ApiError::Internal(format!("avatar for swimmer {}: {e}", swimmer.id)))?;

    let response = ServeFile::new(path)
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {});
    Ok(response.into_response())
}

// ---------------------------------------------------------------------------
// GET /swimmer/info/{id}
// ---------------------------------------------------------------------------

/// Return `{id, name, laps}` for one swimmer.
pub async fn get_info(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Envelope<Swimmer>, ApiError> {
    let swimmer = find_swimmer(state.store.as_ref(), Some(&raw_id)).await?;
    Ok(Envelope::with_data(swimmer))
}

// ---------------------------------------------------------------------------
// POST /swimmer/add-lap
// ---------------------------------------------------------------------------

/// Count one lap for the swimmer named in the form.
///
/// A body that cannot be read as a form is treated as having no `id`.
pub async fn add_lap(
    State(state): State<Arc<AppState>>,
    form: AddLapForm,
) -> Result<Envelope, ApiError> {
    let swimmer = find_swimmer(state.store.as_ref(), form.id.as_deref()).await?;

    // The swimmer existed a moment ago; `None` here means it vanished,
    // which no endpoint can cause, so report it as not found.
    let updated = state
        .store
        .increment_laps(swimmer.id)
        .await?
        .ok_or(ApiError::NotFound)?;

    debug!(swimmer_id = %updated.id, laps = updated.laps, "Lap counted");
    state.leaderboard.record(updated).await;

    Ok(Envelope::success())
}

// ---------------------------------------------------------------------------
// POST /swimmer/add
// ---------------------------------------------------------------------------

/// Register a swimmer and store the uploaded avatar, if any.
pub async fn add_swimmer(
    State(state): State<Arc<AppState>>,
    form: AddSwimmerForm,
) -> Result<Envelope, ApiError> {
    let (registration, avatar) = form.validate()?;
    let id = registration.id();

    if state.store.get(id).await?.is_some() {
        return Err(ApiError::AlreadyExists);
    }

    // A concurrent registration that slips past the check above still
    // comes back as `DbError::Duplicate`, which maps to `AlreadyExists`.
    let swimmer = state.store.insert(registration).await?;

    info!(swimmer_id = %swimmer.id, name = %swimmer.name, "Swimmer registered");
    state.leaderboard.record(swimmer).await;

    // The swimmer exists from here on. A failed avatar write leaves them
    // on the default image rather than failing a registration that cannot
    // be retried.
    if let Some(bytes) = avatar {
        if let Err(e) = state.avatars.save(id, &bytes).await {
            warn!(swimmer_id = %id, error = %e, "Avatar not saved, default will be served");
        }
    }

    Ok(Envelope::success())
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Health payload.
#[derive(Debug, serde::Serialize)]
pub struct Health {
    /// Always `"ok"` when the server answers.
    pub status: &'static str,
    /// Swimmers on the leaderboard.
    pub swimmers: usize,
    /// Connected leaderboard viewers.
    pub viewers: usize,
}

/// Liveness check.
pub async fn health(State(state): State<Arc<AppState>>) -> Envelope<Health> {
    Envelope::with_data(Health {
        status: "ok",
        swimmers: state.leaderboard.len().await,
        viewers: state.leaderboard.viewer_count(),
    })
}
