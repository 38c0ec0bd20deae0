//! # Carlane Marketplace
//!
//! Car-listing marketplace backend: dealers list cars, admins approve
//! them, the public browses only what has been approved.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the listing query model and repository traits
//! - **application**: Business logic - listing queries, the approval workflow, the dealer gate
//! - **infrastructure**: External concerns (SeaORM database, in-memory catalog, token verification)
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryCatalog};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;

// Re-export API router
pub use interfaces::http::create_api_router;
