//! Listing orchestration
//!
//! Sequences normalization, validation and repository calls for the three
//! listing operations. Every call is terminal on its first failure, and every
//! failure is logged and counted before it is returned.

use std::sync::Arc;

use listings_shared::{Listing, StoredRecord};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::metrics;
use crate::repository::{ListingRepository, StorageError};
use crate::validation::{
    normalize_listing, validate, FieldError, ListingArraySchema, ListingInputSchema,
};

#[derive(Error, Debug)]
pub enum ListingError {
    /// Client-supplied data failed the input schema
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
    /// Stored data failed the output schema
    #[error("Stored listings failed validation ({} problem(s))", .0.len())]
    Integrity(Vec<FieldError>),
    #[error("Failed to {operation}: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: StorageError,
    },
    #[error("No listing found with ID: {0}")]
    NotFound(Uuid),
}

/// Listing operations over an injected repository
#[derive(Clone)]
pub struct ListingService {
    repo: Arc<dyn ListingRepository>,
}

impl ListingService {
    pub fn new(repo: Arc<dyn ListingRepository>) -> Self {
        Self { repo }
    }

    pub fn backend(&self) -> &'static str {
        self.repo.backend()
    }

    pub async fn ping(&self) -> Result<(), ListingError> {
        self.repo
            .ping()
            .await
            .map_err(|err| storage_failure("reach the listing store", "ping", err))
    }

    /// Normalize and validate `raw`, then persist it.
    ///
    /// Returns the record exactly as the repository created it.
    pub async fn create(&self, raw: &Value) -> Result<StoredRecord, ListingError> {
        let normalized = normalize_listing(raw);

        let listing = validate(&ListingInputSchema, &normalized).map_err(|errors| {
            for e in &errors {
                metrics::record_validation_failure(&e.field);
            }
            info!(
                fields = ?errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>(),
                "listing rejected by input schema"
            );
            ListingError::Validation(errors)
        })?;

        let record = self
            .repo
            .create(&listing)
            .await
            .map_err(|err| storage_failure("create listing", "create", err))?;

        metrics::LISTINGS_CREATED.inc();
        info!(id = ?record.get("id"), "listing created");
        Ok(record)
    }

    /// Every stored listing, in store order.
    ///
    /// A single record failing the output schema fails the whole call.
    pub async fn list(&self) -> Result<Vec<Listing>, ListingError> {
        let records = self
            .repo
            .list()
            .await
            .map_err(|err| storage_failure("fetch listings", "list", err))?;

        let listings = validate(&ListingArraySchema, records.as_slice()).map_err(|errors| {
            metrics::INTEGRITY_FAILURES.inc();
            error!(
                problems = %errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
                "stored listings failed output validation"
            );
            ListingError::Integrity(errors)
        })?;

        metrics::LISTINGS_RETURNED.inc_by(listings.len() as u64);
        Ok(listings)
    }

    /// Remove the listing with `id` and return it as stored
    pub async fn delete(&self, id: Uuid) -> Result<StoredRecord, ListingError> {
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|err| storage_failure("delete listing", "delete", err))?;

        match deleted {
            Some(record) => {
                metrics::LISTINGS_DELETED.inc();
                info!(%id, "listing deleted");
                Ok(record)
            }
            None => {
                warn!(%id, "delete requested for unknown listing");
                Err(ListingError::NotFound(id))
            }
        }
    }
}

fn storage_failure(operation: &'static str, label: &str, err: StorageError) -> ListingError {
    metrics::record_storage_error(label);
    error!(operation = operation, error = ?err, "repository operation failed");
    ListingError::Storage {
        operation,
        source: err,
    }
}
