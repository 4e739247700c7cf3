//! Listing validation and normalization
//!
//! Everything a listing goes through between the wire and the store lives
//! here.
//!
//! # Overview
//!
//! 1. **Normalizer** - turns a raw JSON payload into a [`NormalizedListing`]:
//!    numeric strings become numbers, phone numbers become bare digits with
//!    any leading US country code removed.
//! 2. **Schemas** - [`ListingInputSchema`] turns a normalized payload into a
//!    [`NewListing`](listings_shared::NewListing); [`ListingOutputSchema`] and
//!    [`ListingArraySchema`] turn stored records into
//!    [`Listing`](listings_shared::Listing)s.
//! 3. **Validators** - the per-field checks the schemas are built from.
//! 4. **Extractors** - [`FieldError`], [`ValidationBuilder`] and the
//!    [`RawJson`] body extractor.
//!
//! Validation never panics and never throws: a rejection is the `Err` side
//! of the result and carries every failing field.
//!
//! ```ignore
//! use crate::validation::{normalize_listing, validate, ListingInputSchema};
//!
//! let normalized = normalize_listing(&payload);
//! match validate(&ListingInputSchema, &normalized) {
//!     Ok(listing) => repo.create(&listing).await,
//!     Err(errors) => /* 400 with `errors` */,
//! }
//! ```
//!
//! ## Validation Error Response
//!
//! ```json
//! {
//!   "error": "ValidationError",
//!   "message": "Validation failed for 2 fields",
//!   "errors": [
//!     {"field": "rent", "message": "Rent must be a positive number"},
//!     {"field": "contact", "message": "Contact number must be 10 digits"}
//!   ],
//!   "code": 400,
//!   "timestamp": "2026-02-20T10:30:00Z",
//!   "correlation_id": "uuid-here"
//! }
//! ```

pub mod extractors;
pub mod normalizer;
pub mod schemas;
pub mod validators;

pub use extractors::{FieldError, RawJson, ValidationBuilder, ValidationError};
pub use normalizer::{canonical_contact, coerce_number, normalize_listing, NormalizedListing};
pub use schemas::{validate, ListingArraySchema, ListingInputSchema, ListingOutputSchema, Schema};
