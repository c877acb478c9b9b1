//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>`, but additionally runs
//! `validator::Validate::validate()` on the deserialized value. Any
//! rejection becomes a `BAD_REQUEST` [`RpcError`] whose `data.issues`
//! lists what was wrong, before the handler body runs.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use validator::{Validate, ValidationErrors};

use super::RpcError;

/// Message carried by every input-validation failure.
pub const INPUT_VALIDATION_FAILED: &str = "Input validation failed";

/// An extractor that deserializes JSON and validates it.
///
/// # Usage
///
/// ```ignore
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct UpsertLevel {
///     #[validate(length(min = 1, max = 50))]
///     level_id: String,
/// }
///
/// async fn handler(ValidatedJson(body): ValidatedJson<UpsertLevel>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Error type for `ValidatedJson` extraction failures.
pub enum ValidatedJsonRejection {
    /// JSON parsing failed.
    JsonError(JsonRejection),
    /// Validation failed.
    ValidationError(ValidationErrors),
}

/// One problem with the submitted input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputIssue {
    /// Offending field; empty for whole-object rules.
    pub path: String,
    pub message: String,
}

pub fn issues_from(errors: &ValidationErrors) -> Vec<InputIssue> {
    let mut issues: Vec<InputIssue> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            let path = if *field == "__all__" {
                String::new()
            } else {
                field.to_string()
            };
            errs.iter().map(move |e| InputIssue {
                path: path.clone(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();
    issues.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.message.cmp(&b.message)));
    issues
}

impl From<ValidatedJsonRejection> for RpcError {
    fn from(rejection: ValidatedJsonRejection) -> Self {
        match rejection {
            ValidatedJsonRejection::JsonError(JsonRejection::JsonDataError(e)) => {
                RpcError::bad_request(INPUT_VALIDATION_FAILED).with_data(json!({
                    "issues": [{ "path": "", "message": e.body_text() }]
                }))
            }
            ValidatedJsonRejection::JsonError(rejection) => {
                RpcError::bad_request("Malformed request body")
                    .with_data(json!({ "detail": rejection.body_text() }))
            }
            ValidatedJsonRejection::ValidationError(errors) => {
                RpcError::bad_request(INPUT_VALIDATION_FAILED)
                    .with_data(json!({ "issues": issues_from(&errors) }))
            }
        }
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        RpcError::from(self).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use serde_json::Value;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, max = 10, message = "name must be 1-10 characters"))]
        name: String,
        #[validate(email(message = "invalid email"))]
        email: String,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<TestBody>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new().route("/test", post(handler))
    }

    async fn send(body: impl Into<Body>) -> (StatusCode, Value) {
        use tower::Service;
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap();

        let mut svc = app().into_service();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let body = serde_json::json!({"name": "Alice", "email": "alice@msl.ac.th"});
        let (status, _) = send(serde_json::to_vec(&body).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_bad_request() {
        let (status, json) = send("not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "BAD_REQUEST");
        assert_eq!(json["message"], "Malformed request body");
    }

    #[tokio::test]
    async fn missing_field_is_an_input_issue() {
        let (status, json) = send(r#"{"name": "Alice"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], INPUT_VALIDATION_FAILED);
    }

    #[tokio::test]
    async fn validation_failure_lists_each_field() {
        let body = serde_json::json!({"name": "", "email": "nope"});
        let (status, json) = send(serde_json::to_vec(&body).unwrap()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "BAD_REQUEST");
        let issues = json["data"]["issues"].as_array().unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0]["path"], "email");
        assert_eq!(issues[1]["path"], "name");
        assert_eq!(issues[1]["message"], "name must be 1-10 characters");
    }
}
