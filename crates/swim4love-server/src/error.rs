//! Error types for the HTTP API.
//!
//! [`ApiError`] unifies every failure a handler can report. Its
//! [`IntoResponse`] implementation turns it into the JSON envelope
//! `{code, msg}` with the matching HTTP status, so handlers only ever
//! return `Result<_, ApiError>`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use swim4love_db::DbError;

use crate::envelope::Envelope;

/// Envelope code for malformed or missing input.
pub const CODE_INVALID_INPUT: i32 = 1;
/// Envelope code for a conflicting registration.
pub const CODE_CONFLICT: i32 = 2;
/// Envelope code for an unknown swimmer.
pub const CODE_NOT_FOUND: i32 = 3;
/// Envelope code for a server-side failure.
pub const CODE_INTERNAL: i32 = 4;

/// Errors that can occur in the HTTP API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The submitted swimmer id failed the format rule (or was absent).
    #[error("Invalid swimmer ID")]
    InvalidId,

    /// A required form field was absent or blank.
    #[error("Missing parameters")]
    MissingParameters,

    /// The request body could not be decoded.
    #[error("Malformed form data: {0}")]
    MalformedForm(String),

    /// No swimmer has the requested id.
    #[error("Swimmer does not exist")]
    NotFound,

    /// A swimmer with the requested id is already registered.
    #[error("Swimmer ID already exists")]
    AlreadyExists,

    /// The store failed.
    #[error("storage error: {0}")]
    Storage(DbError),

    /// Any other server-side failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Duplicate(_) => Self::AlreadyExists,
            other => Self::Storage(other),
        }
    }
}

impl ApiError {
    /// The envelope `code` for this error.
    pub const fn code(&self) -> i32 {
        match self {
            Self::InvalidId | Self::MissingParameters | Self::MalformedForm(_) => {
                CODE_INVALID_INPUT
            }
            Self::AlreadyExists => CODE_CONFLICT,
            Self::NotFound => CODE_NOT_FOUND,
            Self::Storage(_) | Self::Internal(_) => CODE_INTERNAL,
        }
    }

    /// The HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId | Self::MissingParameters | Self::MalformedForm(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match &self {
            Self::Storage(e) => {
                tracing::error!(error = %e, "Storage error");
                String::from("Internal server error")
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                String::from("Internal server error")
            }
            other => other.to_string(),
        };

        (status, Envelope::error(self.code(), msg)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_documented_codes() {
        assert_eq!(ApiError::InvalidId.code(), 1);
        assert_eq!(ApiError::InvalidId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingParameters.code(), 1);
        assert_eq!(ApiError::AlreadyExists.code(), 2);
        assert_eq!(ApiError::AlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::NotFound.code(), 3);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_from_store_becomes_conflict() {
        let id = swim4love_types::SwimmerId::new(5);
        let err = id.map(|id| ApiError::from(DbError::Duplicate(id)));
        assert!(matches!(err, Some(ApiError::AlreadyExists)));
    }

    #[test]
    fn storage_errors_are_internal() {
        let err = ApiError::from(DbError::Config(String::from("boom")));
        assert_eq!(err.code(), CODE_INTERNAL);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn messages_match_the_wire_contract() {
        assert_eq!(ApiError::InvalidId.to_string(), "Invalid swimmer ID");
        assert_eq!(ApiError::MissingParameters.to_string(), "Missing parameters");
        assert_eq!(ApiError::NotFound.to_string(), "Swimmer does not exist");
        assert_eq!(ApiError::AlreadyExists.to_string(), "Swimmer ID already exists");
    }
}
