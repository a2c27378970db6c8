//! The JSON envelope every API response is wrapped in.
//!
//! ```json
//! {"code": 0, "msg": "Success", "data": {...}}
//! ```
//!
//! `code` is 0 on success. `data` is omitted when there is nothing to return.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Envelope `code` for success.
pub const CODE_SUCCESS: i32 = 0;

/// A response envelope carrying an optional payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<T = ()> {
    /// 0 for success, otherwise an error kind.
    pub code: i32,
    /// Human-readable status.
    pub msg: String,
    /// Response payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl Envelope<()> {
    /// Success without a payload.
    pub fn success() -> Self {
        Self {
            code: CODE_SUCCESS,
            msg: String::from("Success"),
            data: None,
        }
    }

    /// An error envelope.
    pub const fn error(code: i32, msg: String) -> Self {
        Self {
            code,
            msg,
            data: None,
        }
    }
}

impl<T: Serialize> Envelope<T> {
    /// Success with a payload.
    pub fn with_data(data: T) -> Self {
        Self {
            code: CODE_SUCCESS,
            msg: String::from("Success"),
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn success_omits_data() {
        let json = serde_json::to_value(Envelope::success()).unwrap();
        assert_eq!(json, serde_json::json!({"code": 0, "msg": "Success"}));
    }

    #[test]
    fn payload_is_nested_under_data() {
        let envelope = Envelope::with_data(serde_json::json!({"laps": 3}));
        let json = serde_json::to_value(envelope).unwrap();
        assert_eq!(json["data"]["laps"], 3);
        assert_eq!(json["code"], 0);
    }
}
