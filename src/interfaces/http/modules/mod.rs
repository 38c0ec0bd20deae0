//! HTTP endpoint modules
//!
//! Each module owns its DTOs and handlers; they all share `AppState`.

pub mod admin;
pub mod cars;
pub mod dealers;
pub mod health;

use std::sync::Arc;
use std::time::Duration;

use crate::application::{DealerService, ListingService, VisibilityService};
use crate::domain::RepositoryProvider;

use cars::LatestCache;

/// Shared handler state: the three application services plus the
/// landing-page cache, all behind cheap clones.
#[derive(Clone)]
pub struct AppState {
    pub listing: Arc<ListingService>,
    pub visibility: Arc<VisibilityService>,
    pub dealers: Arc<DealerService>,
    pub latest_cache: LatestCache,
}

impl AppState {
    pub fn new(repos: Arc<dyn RepositoryProvider>, latest_cache_ttl: Duration) -> Self {
        Self {
            listing: Arc::new(ListingService::new(repos.clone())),
            visibility: Arc::new(VisibilityService::new(repos.clone())),
            dealers: Arc::new(DealerService::new(repos)),
            latest_cache: LatestCache::new(latest_cache_ttl),
        }
    }
}
