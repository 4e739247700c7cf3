use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ═══════════════════════════════════════════════════════════════════════════
// LISTING TYPES
// ═══════════════════════════════════════════════════════════════════════════

/// A rental listing as returned to clients after passing the output schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub rent: i64,
    pub address: String,
    pub rooms: i64,
    /// Canonical 10-digit phone number, no formatting characters
    pub contact: String,
    pub created_at: DateTime<Utc>,
}

/// A listing accepted by the input schema, ready to be persisted.
///
/// `rent` stays a float here: the write path only requires a positive number,
/// the integer contract is enforced when records are read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub rent: f64,
    pub address: String,
    pub rooms: i64,
    pub contact: String,
}

/// A record exactly as the store hands it back, before any output validation
pub type StoredRecord = serde_json::Value;

/// Names of the client-facing listing fields, in form order
pub const LISTING_FIELDS: [&str; 6] = ["title", "description", "rent", "address", "rooms", "contact"];
