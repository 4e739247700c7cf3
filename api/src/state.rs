use prometheus::Registry;
use std::sync::Arc;
use std::time::Instant;

use crate::listing_service::ListingService;
use crate::repository::ListingRepository;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub listings: ListingService,
    pub started_at: Instant,
    pub registry: Registry,
}

impl AppState {
    pub fn new(repo: Arc<dyn ListingRepository>, registry: Registry) -> Self {
        Self {
            listings: ListingService::new(repo),
            started_at: Instant::now(),
            registry,
        }
    }
}
