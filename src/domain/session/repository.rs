use async_trait::async_trait;

use super::{CreateSessionDto, Session};
use crate::domain::DomainResult;

#[async_trait]
pub trait SessionRepositoryInterface: Send + Sync {
    async fn create_session(&self, dto: CreateSessionDto) -> DomainResult<Session>;
    async fn find_session(&self, id: &str) -> DomainResult<Option<Session>>;

    /// Removes the session; returns whether a row was deleted.
    async fn delete_session(&self, id: &str) -> DomainResult<bool>;
}
