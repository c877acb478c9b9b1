use super::UserRole;

/// Input for creating a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub username: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
}
