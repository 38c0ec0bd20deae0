//! Dealer aggregate

pub mod model;
pub mod repository;

pub use model::Dealer;
pub use repository::DealerRepository;
