//! Uniform JSON envelope returned by every endpoint.
//!
//! ```json
//! { "status": true, "data": { ... }, "message": "Success", "apiVersion": "0.1.0" }
//! ```
//!
//! `status` is the business outcome, which is independent of the HTTP status
//! code: a not-found lookup is `status: true` with `data: null`, and a
//! validation failure is `status: false` with HTTP 200.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const SUCCESS_MESSAGE: &str = "Success";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status: bool,
    pub data: Option<T>,
    pub message: String,
    pub api_version: &'static str,
    #[serde(skip)]
    pub http_status: StatusCode,
}

impl<T> ApiResponse<T> {
    pub fn new(status: bool, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            status,
            data,
            message: message.into(),
            api_version: API_VERSION,
            http_status: StatusCode::OK,
        }
    }

    /// `status: true` with a payload and the default "Success" message.
    pub fn success(data: T) -> Self {
        Self::new(true, Some(data), SUCCESS_MESSAGE)
    }

    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(true, Some(data), message)
    }

    /// `status: true` without a payload, e.g. "Course Does Not Exist.".
    pub fn notice(message: impl Into<String>) -> Self {
        Self::new(true, None, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(false, None, message)
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.http_status = status;
        self
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (self.http_status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::success(json!({"id": 1}));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["status"], true);
        assert_eq!(value["data"]["id"], 1);
        assert_eq!(value["message"], "Success");
        assert_eq!(value["apiVersion"], API_VERSION);
        assert!(value.get("httpStatus").is_none());
    }

    #[test]
    fn test_notice_has_null_data() {
        let response = ApiResponse::<()>::notice("Course Does Not Exist.");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["status"], true);
        assert!(value["data"].is_null());
        assert_eq!(value["message"], "Course Does Not Exist.");
    }

    #[test]
    fn test_with_status_overrides_default() {
        let response = ApiResponse::<()>::failure("No Such User").with_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.http_status, StatusCode::UNAUTHORIZED);
        assert!(!response.status);
    }

    #[test]
    fn test_into_response_uses_http_status() {
        let response = ApiResponse::ok(5, "Saved").into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
