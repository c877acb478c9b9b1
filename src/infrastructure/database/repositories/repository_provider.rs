//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::{
    AcademicRepositoryInterface, AccountRepositoryInterface, RolePermissionRepositoryInterface,
    SessionRepositoryInterface, UserRepositoryInterface,
};

use super::academic_repository::SeaOrmAcademicRepository;
use super::account_repository::SeaOrmAccountRepository;
use super::role_permission_repository::SeaOrmRolePermissionRepository;
use super::session_repository::SeaOrmSessionRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let user = repos.users().get_user_by_username("teacher1").await?;
/// let session = repos.sessions().find_session(&sid).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    sessions: SeaOrmSessionRepository,
    accounts: SeaOrmAccountRepository,
    role_permissions: SeaOrmRolePermissionRepository,
    academics: SeaOrmAcademicRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            sessions: SeaOrmSessionRepository::new(db.clone()),
            accounts: SeaOrmAccountRepository::new(db.clone()),
            role_permissions: SeaOrmRolePermissionRepository::new(db.clone()),
            academics: SeaOrmAcademicRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepositoryInterface {
        &self.users
    }

    fn sessions(&self) -> &dyn SessionRepositoryInterface {
        &self.sessions
    }

    fn accounts(&self) -> &dyn AccountRepositoryInterface {
        &self.accounts
    }

    fn role_permissions(&self) -> &dyn RolePermissionRepositoryInterface {
        &self.role_permissions
    }

    fn academics(&self) -> &dyn AcademicRepositoryInterface {
        &self.academics
    }
}
