//! Listing query engine
//!
//! Read-only views over the catalog: paged search, details, per-dealer
//! listings, latest published cars, and the brand/category lookups that
//! feed filter UIs. No operation here mutates state.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    Car, CarDetails, CarPage, CarQuery, Category, DomainError, DomainResult, RepositoryProvider,
};

/// How many cars the landing page shows
pub const LATEST_CARS_LIMIT: u64 = 3;

pub struct ListingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ListingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Execute a listing query.
    ///
    /// Out-of-range inputs are normalized rather than rejected: page 0
    /// becomes 1, an explicit page size of 0 becomes 1. A page past the
    /// last one yields an empty item set with the correct total.
    pub async fn all(&self, mut query: CarQuery) -> DomainResult<CarPage> {
        if query.page == 0 {
            query.page = 1;
        }
        if query.cars_per_page == Some(0) {
            query.cars_per_page = Some(1);
        }

        debug!(
            brand = query.brand.as_deref(),
            search_term = query.search_term.as_deref(),
            sorting = %query.sorting,
            page = query.page,
            public_only = query.public_only,
            "Executing listing query"
        );

        self.repos.cars().search(&query).await
    }

    pub async fn details(&self, car_id: i32) -> DomainResult<CarDetails> {
        self.repos
            .cars()
            .details(car_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Car", "id", car_id))
    }

    /// All listings of the dealer registered for `user_id`, any visibility.
    pub async fn by_dealer_user(&self, user_id: &str) -> DomainResult<Vec<Car>> {
        self.repos.cars().find_by_dealer_user(user_id).await
    }

    /// Most recent published cars for the landing page.
    pub async fn latest(&self) -> DomainResult<Vec<Car>> {
        self.repos.cars().latest_public(LATEST_CARS_LIMIT).await
    }

    /// Distinct brands across all cars regardless of visibility, ascending.
    pub async fn brands(&self) -> DomainResult<Vec<String>> {
        self.repos.cars().distinct_brands().await
    }

    pub async fn categories(&self) -> DomainResult<Vec<Category>> {
        self.repos.categories().find_all().await
    }
}

// ── Tests ──────────────────────────────────────────────────────
