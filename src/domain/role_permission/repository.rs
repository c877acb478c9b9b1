use async_trait::async_trait;

use super::{RolePermission, UpsertRolePermissionDto};
use crate::domain::DomainResult;

#[async_trait]
pub trait RolePermissionRepositoryInterface: Send + Sync {
    async fn upsert_by_name(&self, dto: UpsertRolePermissionDto) -> DomainResult<RolePermission>;
    async fn list(&self) -> DomainResult<Vec<RolePermission>>;
}
