//! Car repository interface

use async_trait::async_trait;

use super::model::{Car, CarDetails, CarPage, CarQuery};
use crate::domain::DomainResult;

/// Listing storage contract.
///
/// `search` executes the whole query pipeline (filter, count, sort,
/// paginate) inside the store so adapters can push it down to SQL.
#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn search(&self, query: &CarQuery) -> DomainResult<CarPage>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Car>>;
    async fn details(&self, id: i32) -> DomainResult<Option<CarDetails>>;
    /// All cars listed by the dealer tied to the given external user id,
    /// regardless of visibility.
    async fn find_by_dealer_user(&self, user_id: &str) -> DomainResult<Vec<Car>>;
    /// Most recent Published cars, descending id, at most `limit`.
    async fn latest_public(&self, limit: u64) -> DomainResult<Vec<Car>>;
    /// Distinct brands over all cars (any visibility), ascending.
    async fn distinct_brands(&self) -> DomainResult<Vec<String>>;
    /// Insert a new listing, returning its assigned id.
    async fn insert(&self, car: Car) -> DomainResult<i32>;
    async fn update(&self, car: Car) -> DomainResult<()>;
    /// True iff the car exists and belongs to the given dealer.
    async fn is_owned_by(&self, car_id: i32, dealer_id: i32) -> DomainResult<bool>;
}
