//! Dealer repository interface

use async_trait::async_trait;

use super::model::Dealer;
use crate::domain::DomainResult;

#[async_trait]
pub trait DealerRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Dealer>>;
    async fn find_by_user_id(&self, user_id: &str) -> DomainResult<Option<Dealer>>;
    async fn exists_by_user_id(&self, user_id: &str) -> DomainResult<bool>;
    /// Insert a new dealer, returning it with its assigned id.
    async fn insert(&self, dealer: Dealer) -> DomainResult<Dealer>;
}
