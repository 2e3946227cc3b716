//! Application error type.
//!
//! Every handler returns `Result<_, AppError>` and propagates with `?`. The
//! [`IntoResponse`] impl is the single place where failures are logged and
//! rendered as the response envelope with `status: false`.
//!
//! Business rejections (validation failures, duplicates, missing scope
//! parameters) are reported with HTTP 200 through [`AppError::rejected`];
//! only token failures, unparseable bodies and server faults use other codes.

use anyhow::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::response::ApiResponse;

/// Message returned to clients for any server-side failure. Details are
/// only written to the logs.
pub const GENERIC_ERROR_MESSAGE: &str = "Error";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message.into()))
    }

    /// A failure the client caused that is still answered with HTTP 200 and
    /// `status: false`.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, anyhow::anyhow!(message.into()))
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// The message that ends up in the envelope.
    pub fn public_message(&self) -> String {
        if self.is_server_error() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        } else if self.status == StatusCode::UNAUTHORIZED {
            warn!(error = %self.error, "Request rejected as unauthorized");
        }

        ApiResponse::<()>::failure(self.public_message())
            .with_status(self.status)
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_rejected_renders_ok_with_false_status() {
        let response = AppError::rejected("Batch Already Exists.").into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], false);
        assert_eq!(body["message"], "Batch Already Exists.");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response =
            AppError::internal(anyhow::anyhow!("relation \"courses\" does not exist"))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["status"], false);
        assert_eq!(body["message"], "Error");
    }

    #[tokio::test]
    async fn test_unauthorized_keeps_message() {
        let response = AppError::unauthorized("Token Invalid").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Token Invalid");
        assert!(body["apiVersion"].is_string());
    }

    #[test]
    fn test_from_sqlx_error_is_internal() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), GENERIC_ERROR_MESSAGE);
    }
}
