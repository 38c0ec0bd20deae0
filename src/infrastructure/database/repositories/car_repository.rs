//! SeaORM implementation of CarRepository

use async_trait::async_trait;
use log::info;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::car::{Car, CarDetails, CarPage, CarQuery, CarRepository, CarSorting};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{car, category, dealer};

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

fn entity_to_domain(c: car::Model) -> Car {
    Car {
        id: c.id,
        brand: c.brand,
        model: c.model,
        description: c.description,
        image_url: c.image_url,
        year: c.year,
        category_id: c.category_id,
        dealer_id: c.dealer_id,
        is_public: c.is_public,
        created_at: c.created_at,
        updated_at: c.updated_at,
    }
}

fn domain_to_active(c: &Car) -> car::ActiveModel {
    car::ActiveModel {
        id: Set(c.id),
        brand: Set(c.brand.clone()),
        model: Set(c.model.clone()),
        description: Set(c.description.clone()),
        image_url: Set(c.image_url.clone()),
        year: Set(c.year),
        category_id: Set(c.category_id),
        dealer_id: Set(c.dealer_id),
        is_public: Set(c.is_public),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    }
}

/// Build the filter stage of the listing pipeline as a SQL select.
fn filtered_select(query: &CarQuery) -> sea_orm::Select<car::Entity> {
    let mut select = car::Entity::find();

    if query.public_only {
        select = select.filter(car::Column::IsPublic.eq(true));
    }

    if let Some(brand) = query.brand.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        select = select.filter(car::Column::Brand.eq(brand));
    }

    if let Some(term) = query
        .search_term
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        let pattern = format!("%{}%", term.to_lowercase());
        select = select.filter(
            Condition::any()
                .add(Expr::cust_with_values(
                    "LOWER(brand || ' ' || model) LIKE ?",
                    [pattern.clone()],
                ))
                .add(Expr::cust_with_values(
                    "LOWER(description) LIKE ?",
                    [pattern],
                )),
        );
    }

    select
}

pub struct SeaOrmCarRepository {
    db: DatabaseConnection,
}

impl SeaOrmCarRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CarRepository for SeaOrmCarRepository {
    async fn search(&self, query: &CarQuery) -> DomainResult<CarPage> {
        let filtered = filtered_select(query);

        // Count over the filtered-but-unpaged set
        let total_cars = filtered.clone().count(&self.db).await.map_err(db_err)?;

        let mut select = match query.sorting {
            CarSorting::Recency => filtered.order_by_desc(car::Column::Id),
            CarSorting::YearDesc => filtered.order_by_desc(car::Column::Year),
            CarSorting::BrandModelAsc => filtered
                .order_by_asc(car::Column::Brand)
                .order_by_asc(car::Column::Model),
        };

        if let Some(per_page) = query.cars_per_page {
            select = select.offset(query.offset()).limit(per_page);
        }

        let models = select.all(&self.db).await.map_err(db_err)?;

        Ok(CarPage {
            total_cars,
            current_page: query.page,
            cars_per_page: query.cars_per_page,
            items: models.into_iter().map(entity_to_domain).collect(),
        })
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Car>> {
        let model = car::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn details(&self, id: i32) -> DomainResult<Option<CarDetails>> {
        let Some(c) = car::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let d = dealer::Entity::find_by_id(c.dealer_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Dealer", "id", c.dealer_id))?;

        let cat = category::Entity::find_by_id(c.category_id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Category", "id", c.category_id))?;

        Ok(Some(CarDetails {
            car: entity_to_domain(c),
            category_name: cat.name,
            dealer_name: d.name,
            dealer_phone: d.phone_number,
            dealer_user_id: d.user_id,
        }))
    }

    async fn find_by_dealer_user(&self, user_id: &str) -> DomainResult<Vec<Car>> {
        let Some(d) = dealer::Entity::find()
            .filter(dealer::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(Vec::new());
        };

        let models = car::Entity::find()
            .filter(car::Column::DealerId.eq(d.id))
            .order_by_desc(car::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn latest_public(&self, limit: u64) -> DomainResult<Vec<Car>> {
        let models = car::Entity::find()
            .filter(car::Column::IsPublic.eq(true))
            .order_by_desc(car::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn distinct_brands(&self) -> DomainResult<Vec<String>> {
        let brands: Vec<String> = car::Entity::find()
            .select_only()
            .column(car::Column::Brand)
            .distinct()
            .order_by_asc(car::Column::Brand)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(brands)
    }

    async fn insert(&self, c: Car) -> DomainResult<i32> {
        let mut model = domain_to_active(&c);
        model.id = sea_orm::ActiveValue::NotSet;
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Car saved: {} {} ({})", result.brand, result.model, result.id);
        Ok(result.id)
    }

    async fn update(&self, c: Car) -> DomainResult<()> {
        let existing = car::Entity::find_by_id(c.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::not_found("Car", "id", c.id));
        }

        domain_to_active(&c).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn is_owned_by(&self, car_id: i32, dealer_id: i32) -> DomainResult<bool> {
        let count = car::Entity::find()
            .filter(car::Column::Id.eq(car_id))
            .filter(car::Column::DealerId.eq(dealer_id))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }
}
