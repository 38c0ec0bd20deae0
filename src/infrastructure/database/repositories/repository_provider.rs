//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::car::CarRepository;
use crate::domain::category::CategoryRepository;
use crate::domain::dealer::DealerRepository;
use crate::domain::repositories::RepositoryProvider;

use super::car_repository::SeaOrmCarRepository;
use super::category_repository::SeaOrmCategoryRepository;
use super::dealer_repository::SeaOrmDealerRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let page = repos.cars().search(&CarQuery::public()).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    cars: SeaOrmCarRepository,
    dealers: SeaOrmDealerRepository,
    categories: SeaOrmCategoryRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            cars: SeaOrmCarRepository::new(db.clone()),
            dealers: SeaOrmDealerRepository::new(db.clone()),
            categories: SeaOrmCategoryRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn cars(&self) -> &dyn CarRepository {
        &self.cars
    }

    fn dealers(&self) -> &dyn DealerRepository {
        &self.dealers
    }

    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }
}
