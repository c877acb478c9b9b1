//! SeaORM implementation of SessionRepositoryInterface

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use super::db_err;
use crate::domain::{CreateSessionDto, DomainResult, Session, SessionRepositoryInterface};
use crate::infrastructure::database::entities::session;

pub struct SeaOrmSessionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn session_model_to_domain(model: session::Model) -> Session {
    Session {
        id: model.id,
        user_id: model.user_id,
        expires_at: model.expires_at,
        ip_address: model.ip_address,
        user_agent: model.user_agent,
        created_at: model.created_at,
    }
}

#[async_trait]
impl SessionRepositoryInterface for SeaOrmSessionRepository {
    async fn create_session(&self, dto: CreateSessionDto) -> DomainResult<Session> {
        let model = session::ActiveModel {
            id: Set(dto.id),
            user_id: Set(dto.user_id),
            expires_at: Set(dto.expires_at),
            ip_address: Set(dto.ip_address),
            user_agent: Set(dto.user_agent),
            created_at: Set(Utc::now()),
        };

        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(session_model_to_domain(saved))
    }

    async fn find_session(&self, id: &str) -> DomainResult<Option<Session>> {
        let model = session::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(session_model_to_domain))
    }

    async fn delete_session(&self, id: &str) -> DomainResult<bool> {
        let result = session::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
