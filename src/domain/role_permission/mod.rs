//! Role permission records

mod model;
mod repository;

pub use model::{Action, PermissionMap, RolePermission, UpsertRolePermissionDto};
pub use repository::RolePermissionRepositoryInterface;
