//! In-memory catalog implementation
//!
//! DashMap-backed store implementing every repository trait. Backs tests
//! (the fake Catalog Store the services are exercised against) and local
//! development without a database.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::car::{Car, CarDetails, CarPage, CarQuery, CarRepository};
use crate::domain::category::{Category, CategoryRepository};
use crate::domain::dealer::{Dealer, DealerRepository};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::{DomainError, DomainResult};

pub struct InMemoryCatalog {
    cars: DashMap<i32, Car>,
    dealers: DashMap<i32, Dealer>,
    categories: DashMap<i32, Category>,
    car_counter: AtomicI32,
    dealer_counter: AtomicI32,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        let catalog = Self {
            cars: DashMap::new(),
            dealers: DashMap::new(),
            categories: DashMap::new(),
            car_counter: AtomicI32::new(1),
            dealer_counter: AtomicI32::new(1),
        };

        // Same lookup set the migration seeds
        for (id, name) in [
            (1, "Economy"),
            (2, "Family"),
            (3, "SUV"),
            (4, "Luxury"),
            (5, "Sports"),
        ] {
            catalog.categories.insert(
                id,
                Category {
                    id,
                    name: name.to_string(),
                },
            );
        }

        catalog
    }

    /// Insert a car with a caller-chosen id, advancing the counter past it.
    /// Test seeding helper.
    pub fn put_car(&self, car: Car) {
        self.car_counter.fetch_max(car.id + 1, Ordering::SeqCst);
        self.cars.insert(car.id, car);
    }

    /// Insert a dealer with a caller-chosen id, advancing the counter past
    /// it.
    pub fn put_dealer(&self, dealer: Dealer) {
        self.dealer_counter
            .fetch_max(dealer.id + 1, Ordering::SeqCst);
        self.dealers.insert(dealer.id, dealer);
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CarRepository for InMemoryCatalog {
    async fn search(&self, query: &CarQuery) -> DomainResult<CarPage> {
        let mut matched: Vec<Car> = self
            .cars
            .iter()
            .filter(|entry| query.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        let total_cars = matched.len() as u64;
        query.sort(&mut matched);

        let items = match query.cars_per_page {
            Some(per_page) => matched
                .into_iter()
                .skip(query.offset() as usize)
                .take(per_page as usize)
                .collect(),
            None => matched,
        };

        Ok(CarPage {
            total_cars,
            current_page: query.page,
            cars_per_page: query.cars_per_page,
            items,
        })
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Car>> {
        Ok(self.cars.get(&id).map(|c| c.clone()))
    }

    async fn details(&self, id: i32) -> DomainResult<Option<CarDetails>> {
        let Some(car) = self.cars.get(&id).map(|c| c.clone()) else {
            return Ok(None);
        };

        let dealer = self
            .dealers
            .get(&car.dealer_id)
            .map(|d| d.clone())
            .ok_or_else(|| DomainError::not_found("Dealer", "id", car.dealer_id))?;
        let category = self
            .categories
            .get(&car.category_id)
            .map(|c| c.clone())
            .ok_or_else(|| DomainError::not_found("Category", "id", car.category_id))?;

        Ok(Some(CarDetails {
            car,
            category_name: category.name,
            dealer_name: dealer.name,
            dealer_phone: dealer.phone_number,
            dealer_user_id: dealer.user_id,
        }))
    }

    async fn find_by_dealer_user(&self, user_id: &str) -> DomainResult<Vec<Car>> {
        let Some(dealer_id) = self
            .dealers
            .iter()
            .find(|d| d.user_id == user_id)
            .map(|d| d.id)
        else {
            return Ok(Vec::new());
        };

        let mut cars: Vec<Car> = self
            .cars
            .iter()
            .filter(|c| c.dealer_id == dealer_id)
            .map(|c| c.clone())
            .collect();
        cars.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(cars)
    }

    async fn latest_public(&self, limit: u64) -> DomainResult<Vec<Car>> {
        let mut cars: Vec<Car> = self
            .cars
            .iter()
            .filter(|c| c.is_public)
            .map(|c| c.clone())
            .collect();
        cars.sort_by(|a, b| b.id.cmp(&a.id));
        cars.truncate(limit as usize);
        Ok(cars)
    }

    async fn distinct_brands(&self) -> DomainResult<Vec<String>> {
        let mut brands: Vec<String> = self.cars.iter().map(|c| c.brand.clone()).collect();
        brands.sort();
        brands.dedup();
        Ok(brands)
    }

    async fn insert(&self, mut car: Car) -> DomainResult<i32> {
        let id = self.car_counter.fetch_add(1, Ordering::SeqCst);
        car.id = id;
        self.cars.insert(id, car);
        Ok(id)
    }

    async fn update(&self, car: Car) -> DomainResult<()> {
        if !self.cars.contains_key(&car.id) {
            return Err(DomainError::not_found("Car", "id", car.id));
        }
        self.cars.insert(car.id, car);
        Ok(())
    }

    async fn is_owned_by(&self, car_id: i32, dealer_id: i32) -> DomainResult<bool> {
        Ok(self
            .cars
            .get(&car_id)
            .map(|c| c.dealer_id == dealer_id)
            .unwrap_or(false))
    }
}

#[async_trait]
impl DealerRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Dealer>> {
        Ok(self.dealers.get(&id).map(|d| d.clone()))
    }

    async fn find_by_user_id(&self, user_id: &str) -> DomainResult<Option<Dealer>> {
        Ok(self
            .dealers
            .iter()
            .find(|d| d.user_id == user_id)
            .map(|d| d.clone()))
    }

    async fn exists_by_user_id(&self, user_id: &str) -> DomainResult<bool> {
        Ok(self.dealers.iter().any(|d| d.user_id == user_id))
    }

    async fn insert(&self, mut dealer: Dealer) -> DomainResult<Dealer> {
        if self.dealers.iter().any(|d| d.user_id == dealer.user_id) {
            return Err(DomainError::Conflict(format!(
                "User {} is already a dealer",
                dealer.user_id
            )));
        }
        let id = self.dealer_counter.fetch_add(1, Ordering::SeqCst);
        dealer.id = id;
        self.dealers.insert(id, dealer.clone());
        Ok(dealer)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCatalog {
    async fn find_all(&self) -> DomainResult<Vec<Category>> {
        let mut categories: Vec<Category> = self.categories.iter().map(|c| c.clone()).collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn exists(&self, id: i32) -> DomainResult<bool> {
        Ok(self.categories.contains_key(&id))
    }
}

impl RepositoryProvider for InMemoryCatalog {
    fn cars(&self) -> &dyn CarRepository {
        self
    }

    fn dealers(&self) -> &dyn DealerRepository {
        self
    }

    fn categories(&self) -> &dyn CategoryRepository {
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────
