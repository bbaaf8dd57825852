//! JSON extractor that also runs `validator` rules
//!
//! Malformed bodies are rejected with 400; bodies that parse but break a
//! `#[validate(...)]` rule are rejected with 422 and one `field: message`
//! entry per failure.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiResponse;

/// `Json<T>` plus `T::validate()`.
///
/// ```ignore
/// async fn subscribe(ValidatedJson(body): ValidatedJson<SubscribeRequest>) { .. }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    Json(JsonRejection),
    Invalid(ValidationErrors),
}

/// Flatten field errors into `field: message` strings, sorted by field.
fn describe(errors: &ValidationErrors) -> String {
    let mut lines: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();
    lines.sort();

    if lines.is_empty() {
        "Validation failed".to_string()
    } else {
        lines.join("; ")
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Json(rejection) => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(format!("Invalid JSON: {}", rejection))),
            )
                .into_response(),
            Self::Invalid(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::<()>::error(describe(&errors))),
            )
                .into_response(),
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;
        value.validate().map_err(ValidatedJsonRejection::Invalid)?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct DraftBody {
        #[validate(length(min = 1, message = "title is required"))]
        title: String,
        #[validate(range(min = 1, max = 120))]
        read_time: i32,
    }

    async fn handler(ValidatedJson(body): ValidatedJson<DraftBody>) -> String {
        format!("{}:{}", body.title, body.read_time)
    }

    async fn send(body: &'static str) -> (StatusCode, String) {
        let app = Router::new().route("/drafts", post(handler));
        let req = Request::builder()
            .method("POST")
            .uri("/drafts")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_body_reaches_handler() {
        let (status, body) = send(r#"{"title":"Budgeting","read_time":4}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Budgeting:4");
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let (status, body) = send("{title").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Invalid JSON"));
    }

    #[tokio::test]
    async fn rule_violations_are_422_with_messages() {
        let (status, body) = send(r#"{"title":"","read_time":500}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("title: title is required"));
        assert!(body.contains("read_time: range"));
    }
}
