//! System procedure DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::interfaces::http::dto::UserView;

/// Bare JSON string input.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct SimpleTestInput(pub String);

impl Validate for SimpleTestInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TestInputRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReceivedInput {
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TestInputResponse {
    pub received: ReceivedInput,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PrivateDataResponse {
    pub message: String,
    pub user: UserView,
}
