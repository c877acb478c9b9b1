//! Shared building blocks for the RPC handlers.

pub mod error;
pub mod validated_json;

pub use error::{RpcError, RpcErrorCode};
pub use validated_json::{InputIssue, ValidatedJson, ValidatedJsonRejection, INPUT_VALIDATION_FAILED};
