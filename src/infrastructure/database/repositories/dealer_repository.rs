//! SeaORM implementation of DealerRepository

use async_trait::async_trait;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::domain::dealer::{Dealer, DealerRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::dealer;

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

fn entity_to_domain(d: dealer::Model) -> Dealer {
    Dealer {
        id: d.id,
        name: d.name,
        phone_number: d.phone_number,
        user_id: d.user_id,
        created_at: d.created_at,
    }
}

pub struct SeaOrmDealerRepository {
    db: DatabaseConnection,
}

impl SeaOrmDealerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DealerRepository for SeaOrmDealerRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Dealer>> {
        let model = dealer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_by_user_id(&self, user_id: &str) -> DomainResult<Option<Dealer>> {
        let model = dealer::Entity::find()
            .filter(dealer::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn exists_by_user_id(&self, user_id: &str) -> DomainResult<bool> {
        let count = dealer::Entity::find()
            .filter(dealer::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn insert(&self, d: Dealer) -> DomainResult<Dealer> {
        let model = dealer::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            name: Set(d.name),
            phone_number: Set(d.phone_number),
            user_id: Set(d.user_id),
            created_at: Set(d.created_at),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Dealer saved: {} ({})", result.name, result.id);
        Ok(entity_to_domain(result))
    }
}
