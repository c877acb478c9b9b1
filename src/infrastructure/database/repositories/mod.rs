//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod academic_repository;
pub mod account_repository;
pub mod repository_provider;
pub mod role_permission_repository;
pub mod session_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, SqlErr};

use crate::shared::errors::{DomainError, InfraError};

pub(crate) fn db_err(e: DbErr) -> DomainError {
    InfraError::Database(e).into()
}

/// Maps unique-constraint violations to `Conflict`, everything else to a
/// storage error.
pub(crate) fn db_err_or_conflict(e: DbErr, what: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Conflict(format!("{} already exists", what))
        }
        _ => db_err(e),
    }
}
