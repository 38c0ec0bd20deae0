//! Car aggregate
//!
//! The listing entity, the query specification value object, and the
//! repository contract the store adapters implement.

pub mod model;
pub mod repository;

pub use model::{Car, CarDetails, CarPage, CarQuery, CarSorting};
pub use repository::CarRepository;
