//! Swimmer id validation and lookup shared by every id-taking endpoint.

use swim4love_db::SwimmerStore;
use swim4love_types::{Swimmer, SwimmerId};

use crate::error::ApiError;

/// Parse submitted text as a swimmer id. Absent text is invalid.
///
/// # Errors
///
/// Returns [`ApiError::InvalidId`] if the text fails the id format rule.
pub fn parse_id(raw: Option<&str>) -> Result<SwimmerId, ApiError> {
    let raw = raw.ok_or(ApiError::InvalidId)?;
    SwimmerId::parse(raw).map_err(|e| {
        tracing::debug!(raw, reason = %e, "Rejected swimmer id");
        ApiError::InvalidId
    })
}

/// Validate `raw` and fetch the swimmer it names.
///
/// # Errors
///
/// Returns [`ApiError::InvalidId`] for malformed text,
/// [`ApiError::NotFound`] if no swimmer has the id, or
/// [`ApiError::Storage`] if the store fails.
pub async fn find_swimmer(
    store: &dyn SwimmerStore,
    raw: Option<&str>,
) -> Result<Swimmer, ApiError> {
    let id = parse_id(raw)?;
    store.get(id).await?.ok_or(ApiError::NotFound)
}
