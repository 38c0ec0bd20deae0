//! Category repository interface

use async_trait::async_trait;

use super::model::Category;
use crate::domain::DomainResult;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Category>>;
    async fn exists(&self, id: i32) -> DomainResult<bool>;
}
