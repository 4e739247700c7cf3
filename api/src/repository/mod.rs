//! Listing persistence
//!
//! The rest of the service only sees [`ListingRepository`]. Records come back
//! as raw JSON ([`StoredRecord`]) so that the output schema validates what the
//! store actually holds, not what a typed decoder made of it.

mod memory;
mod postgres;

pub use memory::InMemoryListingRepository;
pub use postgres::PgListingRepository;

use async_trait::async_trait;
use listings_shared::{NewListing, StoredRecord};
use thiserror::Error;
use uuid::Uuid;

use crate::validation::validators::MAX_SAFE_INTEGER;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Value cannot be stored: {0}")]
    Unstorable(String),
}

/// Rent as the integer column holds it.
///
/// A fractional or out-of-range amount is refused here rather than stored in
/// a shape the read path will reject.
pub(crate) fn rent_column(rent: f64) -> Result<i64, StorageError> {
    if rent.fract() != 0.0 || !(1.0..=MAX_SAFE_INTEGER).contains(&rent) {
        return Err(StorageError::Unstorable(format!(
            "rent {} is not a whole amount between 1 and {}",
            rent, MAX_SAFE_INTEGER
        )));
    }
    Ok(rent as i64)
}

/// Durable store for listings
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Short backend name for health output and logs
    fn backend(&self) -> &'static str;

    /// Cheap round trip to confirm the store is reachable
    async fn ping(&self) -> Result<(), StorageError>;

    /// Persist a validated listing; the store assigns `id` and `created_at`
    async fn create(&self, listing: &NewListing) -> Result<StoredRecord, StorageError>;

    /// Every stored record, oldest first
    async fn list(&self) -> Result<Vec<StoredRecord>, StorageError>;

    /// Remove a listing. `Ok(None)` means nothing matched `id`.
    async fn delete(&self, id: Uuid) -> Result<Option<StoredRecord>, StorageError>;
}
