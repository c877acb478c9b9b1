//! Repository provider for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::academic::AcademicRepositoryInterface;
use super::account::AccountRepositoryInterface;
use super::role_permission::RolePermissionRepositoryInterface;
use super::session::SessionRepositoryInterface;
use super::user::UserRepositoryInterface;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let user = repos.users().get_user_by_username("teacher1").await?;
///     let courses = repos.academics().list_courses().await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepositoryInterface;
    fn sessions(&self) -> &dyn SessionRepositoryInterface;
    fn accounts(&self) -> &dyn AccountRepositoryInterface;
    fn role_permissions(&self) -> &dyn RolePermissionRepositoryInterface;
    fn academics(&self) -> &dyn AcademicRepositoryInterface;
}
