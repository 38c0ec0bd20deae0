//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod car_repository;
pub mod category_repository;
pub mod dealer_repository;
pub mod repository_provider;

pub use car_repository::SeaOrmCarRepository;
pub use category_repository::SeaOrmCategoryRepository;
pub use dealer_repository::SeaOrmDealerRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
