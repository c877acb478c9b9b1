//! SeaORM implementation of RolePermissionRepositoryInterface
//!
//! The permission map is kept as a JSON text column.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::{
    DomainError, DomainResult, PermissionMap, RolePermission, RolePermissionRepositoryInterface,
    UpsertRolePermissionDto,
};
use crate::infrastructure::database::entities::role_permission;
use crate::shared::errors::InfraError;

pub struct SeaOrmRolePermissionRepository {
    db: DatabaseConnection,
}

impl SeaOrmRolePermissionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn encode_permissions(permissions: &PermissionMap) -> DomainResult<String> {
    serde_json::to_string(permissions).map_err(|e| DomainError::from(InfraError::from(e)))
}

fn role_model_to_domain(model: role_permission::Model) -> DomainResult<RolePermission> {
    let permissions: PermissionMap = serde_json::from_str(&model.permissions)
        .map_err(|e| DomainError::from(InfraError::from(e)))?;

    Ok(RolePermission {
        id: model.id,
        name: model.name,
        label: model.label,
        permissions,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

#[async_trait]
impl RolePermissionRepositoryInterface for SeaOrmRolePermissionRepository {
    async fn upsert_by_name(&self, dto: UpsertRolePermissionDto) -> DomainResult<RolePermission> {
        let now = Utc::now();
        let permissions = encode_permissions(&dto.permissions)?;

        let existing = role_permission::Entity::find()
            .filter(role_permission::Column::Name.eq(dto.name.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let saved = match existing {
            Some(model) => {
                let mut active: role_permission::ActiveModel = model.into();
                active.label = Set(dto.label);
                active.permissions = Set(permissions);
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(db_err)?
            }
            None => role_permission::ActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                name: Set(dto.name),
                label: Set(dto.label),
                permissions: Set(permissions),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(db_err)?,
        };

        role_model_to_domain(saved)
    }

    async fn list(&self) -> DomainResult<Vec<RolePermission>> {
        role_permission::Entity::find()
            .order_by_asc(role_permission::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(role_model_to_domain)
            .collect()
    }
}
