//! SeaORM implementation of UserRepositoryInterface

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tracing::debug;

use super::{db_err, db_err_or_conflict};
use crate::domain::{CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface, UserRole};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::Teacher => UserRole::Teacher,
        user::UserRole::User => UserRole::User,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Teacher => user::UserRole::Teacher,
        UserRole::User => user::UserRole::User,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        username: model.username,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        // Checked up front so the common case gets a clean Conflict on every
        // backend; the unique indexes still catch concurrent inserts.
        if self.get_user_by_email(&dto.email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "email '{}' is already registered",
                dto.email
            )));
        }
        if let Some(ref username) = dto.username {
            if self.get_user_by_username(username).await?.is_some() {
                return Err(DomainError::Conflict(format!(
                    "username '{}' is already taken",
                    username
                )));
            }
        }

        let now = Utc::now();
        let model = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(dto.name),
            email: Set(dto.email),
            username: Set(dto.username),
            password_hash: Set(dto.password_hash),
            role: Set(domain_role_to_entity(dto.role)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let saved = model
            .insert(&self.db)
            .await
            .map_err(|e| db_err_or_conflict(e, "User"))?;

        debug!(user_id = %saved.id, "User created");
        Ok(user_model_to_domain(saved))
    }

    async fn upsert_by_username(&self, dto: CreateUserDto) -> DomainResult<User> {
        let Some(username) = dto.username.clone() else {
            return Err(DomainError::Validation(
                "upsert by username requires a username".into(),
            ));
        };

        let existing = user::Entity::find()
            .filter(user::Column::Username.eq(username.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        match existing {
            Some(model) => {
                let mut active: user::ActiveModel = model.into();
                active.name = Set(dto.name);
                active.email = Set(dto.email);
                active.role = Set(domain_role_to_entity(dto.role));
                active.updated_at = Set(Utc::now());

                let updated = active
                    .update(&self.db)
                    .await
                    .map_err(|e| db_err_or_conflict(e, "User"))?;
                Ok(user_model_to_domain(updated))
            }
            None => self.create_user(dto).await,
        }
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_model_to_domain))
    }
}
