//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::infrastructure::crypto::password::{fits_bcrypt, MAX_PASSWORD_BYTES};
use crate::interfaces::http::dto::{SessionView, UserView};

/// Sign in with exactly one identity field plus the password. When both
/// are sent, email wins.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "require_identity"))]
pub struct SignInRequest {
    #[validate(email(message = "Valid email is required"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: Option<String>,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

fn require_identity(request: &SignInRequest) -> Result<(), ValidationError> {
    if request.email.is_none() && request.username.is_none() {
        let mut err = ValidationError::new("identity_required");
        err.message = Some("Either email or username is required".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[validate(
        length(min = 8, max = 128, message = "Password must be 8-128 characters"),
        custom(function = "validate_password_bytes")
    )]
    pub password: String,
    #[validate(
        length(max = 100, message = "Name must be at most 100 characters"),
        custom(function = "validate_name")
    )]
    pub name: String,
    #[validate(custom(function = "validate_username"))]
    pub username: Option<String>,
}

/// bcrypt ignores input past 72 bytes; multi-byte text reaches that well
/// before 128 characters.
pub fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if !fits_bcrypt(password) {
        let mut err = ValidationError::new("password_bytes");
        err.message = Some(format!("Password must be at most {} bytes", MAX_PASSWORD_BYTES).into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("name_required");
        err.message = Some("Name is required".into());
        return Err(err);
    }
    Ok(())
}

/// 3-30 characters of letters, digits, `_` and `.`.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if !(3..=30).contains(&len) {
        let mut err = ValidationError::new("username_length");
        err.message = Some("Username must be 3-30 characters".into());
        return Err(err);
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        let mut err = ValidationError::new("username_charset");
        err.message = Some("Username may only contain letters, digits, '_' and '.'".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignInResponse {
    pub success: bool,
    pub message: String,
    pub user: UserView,
    pub session: SessionView,
    /// Bearer token; also set as the session cookie.
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignUpResponse {
    pub success: bool,
    pub message: String,
    pub user: UserView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GetSessionResponse {
    pub session: Option<SessionView>,
    pub user: Option<UserView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignOutResponse {
    pub success: bool,
    pub message: String,
}
