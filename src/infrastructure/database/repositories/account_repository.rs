//! SeaORM implementation of AccountRepositoryInterface

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::db_err;
use crate::domain::{Account, AccountRepositoryInterface, DomainResult, UpsertAccountDto};
use crate::infrastructure::database::entities::account;

pub struct SeaOrmAccountRepository {
    db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, user_id: &str) -> DomainResult<Option<account::Model>> {
        account::Entity::find()
            .filter(account::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}

fn account_model_to_domain(model: account::Model) -> Account {
    Account {
        id: model.id,
        user_id: model.user_id,
        first_name: model.first_name,
        last_name: model.last_name,
        address_line1: model.address_line1,
        address_line2: model.address_line2,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl AccountRepositoryInterface for SeaOrmAccountRepository {
    async fn upsert_by_user(&self, dto: UpsertAccountDto) -> DomainResult<Account> {
        let now = Utc::now();

        let saved = match self.find_model(&dto.user_id).await? {
            Some(model) => {
                let mut active: account::ActiveModel = model.into();
                active.first_name = Set(dto.first_name);
                active.last_name = Set(dto.last_name);
                active.address_line1 = Set(dto.address_line1);
                active.address_line2 = Set(dto.address_line2);
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(db_err)?
            }
            None => account::ActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                user_id: Set(dto.user_id),
                first_name: Set(dto.first_name),
                last_name: Set(dto.last_name),
                address_line1: Set(dto.address_line1),
                address_line2: Set(dto.address_line2),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(db_err)?,
        };

        Ok(account_model_to_domain(saved))
    }

    async fn get_by_user(&self, user_id: &str) -> DomainResult<Option<Account>> {
        Ok(self.find_model(user_id).await?.map(account_model_to_domain))
    }
}
