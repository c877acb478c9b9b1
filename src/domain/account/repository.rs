use async_trait::async_trait;

use super::{Account, UpsertAccountDto};
use crate::domain::DomainResult;

#[async_trait]
pub trait AccountRepositoryInterface: Send + Sync {
    /// Creates or updates the profile keyed by `user_id`.
    async fn upsert_by_user(&self, dto: UpsertAccountDto) -> DomainResult<Account>;
    async fn get_by_user(&self, user_id: &str) -> DomainResult<Option<Account>>;
}
