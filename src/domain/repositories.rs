//! Repository provider contract
//!
//! Bundles per-aggregate repositories behind one trait so services depend
//! on a single injected collaborator. The SeaORM provider backs production;
//! the in-memory catalog backs tests and development.

use crate::domain::car::CarRepository;
use crate::domain::category::CategoryRepository;
use crate::domain::dealer::DealerRepository;

pub trait RepositoryProvider: Send + Sync {
    fn cars(&self) -> &dyn CarRepository;
    fn dealers(&self) -> &dyn DealerRepository;
    fn categories(&self) -> &dyn CategoryRepository;
}
