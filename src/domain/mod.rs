pub mod car;
pub mod category;
pub mod dealer;
pub mod error;
pub mod repositories;

// Re-export commonly used types
pub use car::{Car, CarDetails, CarPage, CarQuery, CarSorting};
pub use category::Category;
pub use dealer::Dealer;
pub use error::{DomainError, DomainResult};
pub use repositories::RepositoryProvider;
