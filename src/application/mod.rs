pub mod services;

pub use services::{CarInput, DealerService, ListingService, VisibilityService};
