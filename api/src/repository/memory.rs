use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use listings_shared::{NewListing, StoredRecord};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{rent_column, ListingRepository, StorageError};

/// Process-local listing store, used when no database is configured.
///
/// Records are kept in insertion order in the same JSON shape the Postgres
/// backend returns.
#[derive(Default)]
pub struct InMemoryListingRepository {
    records: RwLock<Vec<StoredRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record verbatim, bypassing every check
    pub async fn insert_raw(&self, record: StoredRecord) {
        self.records.write().await.push(record);
    }

    /// Make every subsequent call fail with [`StorageError::Unavailable`]
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(StorageError::Unavailable(
                "in-memory store is switched off".to_string(),
            ));
        }
        Ok(())
    }
}

fn record_id(record: &StoredRecord) -> Option<Uuid> {
    record
        .get("id")
        .and_then(Value::as_str)
        .and_then(|id| Uuid::parse_str(id).ok())
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.check_available()
    }

    async fn create(&self, listing: &NewListing) -> Result<StoredRecord, StorageError> {
        self.check_available()?;
        let rent = rent_column(listing.rent)?;

        let record = json!({
            "id": Uuid::new_v4(),
            "title": listing.title,
            "description": listing.description,
            "rent": rent,
            "address": listing.address,
            "rooms": listing.rooms,
            "contact": listing.contact,
            "created_at": Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        });

        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<StoredRecord>, StorageError> {
        self.check_available()?;
        Ok(self.records.read().await.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<Option<StoredRecord>, StorageError> {
        self.check_available()?;

        let mut records = self.records.write().await;
        let position = records.iter().position(|r| record_id(r) == Some(id));
        Ok(position.map(|index| records.remove(index)))
    }
}
