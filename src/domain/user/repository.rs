use async_trait::async_trait;

use super::{CreateUserDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Inserts a new user. Fails with `Conflict` when the email or username
    /// is already taken.
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    /// Creates the user, or updates name/email/role of the user holding the
    /// same username. The stored password hash is left untouched on update.
    async fn upsert_by_username(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;
}
