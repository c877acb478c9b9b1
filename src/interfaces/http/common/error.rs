//! Error body returned by every RPC procedure.
//!
//! Callers only ever see a coarse code; collaborator detail stays in the
//! server log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpcErrorCode {
    BadRequest,
    Unauthorized,
    InternalServerError,
}

impl RpcErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            RpcErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            RpcErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            RpcErrorCode::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// `{"code": "UNAUTHORIZED", "status": 401, "message": "...", "data": ...}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RpcError {
    pub code: RpcErrorCode,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: RpcErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            status: code.status().as_u16(),
            message: message.into(),
            data: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(RpcErrorCode::BadRequest, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(RpcErrorCode::Unauthorized, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(RpcErrorCode::InternalServerError, message)
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Default mapping for record procedures: caller mistakes become
/// `BAD_REQUEST`, storage failures are logged and hidden.
impl From<DomainError> for RpcError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { .. } | DomainError::Validation(_) | DomainError::Conflict(_) => {
                RpcError::bad_request(err.to_string())
            }
            DomainError::Unauthorized(_) => RpcError::unauthorized("Unauthorized"),
            DomainError::Storage(detail) => {
                error!(error = %detail, "Procedure failed on storage");
                RpcError::internal("Internal server error")
            }
        }
    }
}
