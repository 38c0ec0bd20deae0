//! Business logic services

pub mod dealer;
pub mod listing;
pub mod visibility;

pub use dealer::DealerService;
pub use listing::{ListingService, LATEST_CARS_LIMIT};
pub use visibility::{CarInput, VisibilityService};
