use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use campus_core::AppError;

/// Reported when a body deserializes but does not carry usable values.
pub const INCOMPLETE_DETAILS: &str = "Please Provide All Details.";

pub const GENDERS: [&str; 3] = ["male", "female", "other"];

pub fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    if GENDERS.contains(&gender) {
        Ok(())
    } else {
        Err(ValidationError::new("gender").with_message("Invalid gender".into()))
    }
}

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();

    // field_errors() is a HashMap; keep the output stable.
    messages.sort();
    messages.dedup();

    if messages.is_empty() {
        INCOMPLETE_DETAILS.to_string()
    } else {
        messages.join(", ")
    }
}

/// JSON body extractor that also runs `validator` rules.
///
/// Unparseable bodies are rejected with 400. Bodies that parse but have the
/// wrong shape or fail validation are business rejections: HTTP 200 with
/// `status: false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(_) => {
                    let error_msg = rejection.body_text();
                    match error_msg
                        .split("missing field `")
                        .nth(1)
                        .and_then(|s| s.split('`').next())
                    {
                        Some(field) => AppError::rejected(format!("{} is required", field)),
                        None => AppError::rejected(INCOMPLETE_DETAILS),
                    }
                }
                JsonRejection::MissingJsonContentType(_) => AppError::bad_request(anyhow!(
                    "Missing 'Content-Type: application/json' header"
                )),
                JsonRejection::JsonSyntaxError(_) => {
                    AppError::bad_request(anyhow!("Invalid JSON in request body"))
                }
                _ => AppError::bad_request(anyhow!("Invalid request body")),
            })?;

        value
            .validate()
            .map_err(|errors| AppError::rejected(format_errors(&errors)))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct SampleDto {
        #[validate(length(min = 3, message = "Course Name is too short"))]
        name: String,
        #[validate(range(min = 1, message = "Duration is required"))]
        duration: i64,
    }

    fn json_request(body: &str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn extract(req: Request) -> Result<ValidatedJson<SampleDto>, AppError> {
        ValidatedJson::<SampleDto>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let ValidatedJson(sample) = extract(json_request(r#"{"name":"Physics","duration":4}"#))
            .await
            .unwrap();
        assert_eq!(sample.name, "Physics");
    }

    #[tokio::test]
    async fn test_validation_failure_is_rejection() {
        let err = extract(json_request(r#"{"name":"ab","duration":0}"#))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::OK);
        assert_eq!(
            err.public_message(),
            "Course Name is too short, Duration is required"
        );
    }

    #[tokio::test]
    async fn test_missing_field_names_the_field() {
        let err = extract(json_request(r#"{"duration":3}"#)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::OK);
        assert_eq!(err.public_message(), "name is required");
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        let err = extract(json_request("{not json")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let req = HttpRequest::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"name":"Physics","duration":4}"#))
            .unwrap();
        let err = extract(req).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validate_gender() {
        assert!(validate_gender("female").is_ok());
        let err = validate_gender("unknown").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Invalid gender"));
    }
}
