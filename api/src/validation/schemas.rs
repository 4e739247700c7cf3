//! Listing schemas
//!
//! Two constraint sets describe a listing. [`ListingInputSchema`] guards the
//! write path and runs on a [`NormalizedListing`]. [`ListingOutputSchema`]
//! re-checks every record read back from the store, so corruption or drift
//! in storage is caught before it reaches a client.

use listings_shared::{Listing, NewListing, StoredRecord};

use super::extractors::{FieldError, ValidationBuilder};
use super::normalizer::NormalizedListing;
use super::validators::{
    strict_number, validate_contact, validate_positive_integer, validate_positive_number,
    validate_text, validate_timestamp, validate_uuid,
};

/// A constraint set that turns an untrusted value into a typed one
pub trait Schema {
    type Input: ?Sized;
    type Output;

    /// Apply the schema. Every failing field is reported, not just the first.
    fn validate(&self, input: &Self::Input) -> Result<Self::Output, Vec<FieldError>>;
}

/// Apply `schema` to `input`
pub fn validate<S: Schema>(schema: &S, input: &S::Input) -> Result<S::Output, Vec<FieldError>> {
    schema.validate(input)
}

/// Constraints on client-supplied listings, applied after normalization
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingInputSchema;

impl Schema for ListingInputSchema {
    type Input = NormalizedListing;
    type Output = NewListing;

    fn validate(&self, input: &NormalizedListing) -> Result<NewListing, Vec<FieldError>> {
        let mut builder = ValidationBuilder::new();

        let title = builder.field("title", || validate_text(input.title.as_ref(), "Title"));
        let description = builder.field("description", || {
            validate_text(input.description.as_ref(), "Description")
        });
        let rent = builder.field("rent", || validate_positive_number(input.rent, "Rent"));
        let address = builder.field("address", || validate_text(input.address.as_ref(), "Address"));
        let rooms = builder.field("rooms", || validate_positive_integer(input.rooms, "Rooms"));
        let contact = builder.field("contact", || validate_contact(input.contact.as_ref()));

        match (title, description, rent, address, rooms, contact) {
            (Some(title), Some(description), Some(rent), Some(address), Some(rooms), Some(contact)) => {
                Ok(NewListing {
                    title,
                    description,
                    rent,
                    address,
                    rooms,
                    contact,
                })
            }
            _ => Err(builder.into_errors()),
        }
    }
}

/// Constraints on a single stored record on its way out
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingOutputSchema;

impl Schema for ListingOutputSchema {
    type Input = StoredRecord;
    type Output = Listing;

    fn validate(&self, input: &StoredRecord) -> Result<Listing, Vec<FieldError>> {
        let Some(record) = input.as_object() else {
            return Err(vec![FieldError::new("record", "expected an object")]);
        };
        let mut builder = ValidationBuilder::new();

        let id = builder.field("id", || validate_uuid(record.get("id"), "Id"));
        let title = builder.field("title", || validate_text(record.get("title"), "Title"));
        let description = builder.field("description", || {
            validate_text(record.get("description"), "Description")
        });
        // Fractional rent is accepted on write but must never come back out
        let rent = builder.field("rent", || {
            let rent = strict_number(record.get("rent"), "Rent")?;
            validate_positive_integer(Some(rent), "Rent")
        });
        let address = builder.field("address", || validate_text(record.get("address"), "Address"));
        let rooms = builder.field("rooms", || {
            let rooms = strict_number(record.get("rooms"), "Rooms")?;
            validate_positive_integer(Some(rooms), "Rooms")
        });
        let contact = builder.field("contact", || validate_contact(record.get("contact")));
        let created_at = builder.field("created_at", || {
            validate_timestamp(record.get("created_at"), "Created at")
        });

        match (id, title, description, rent, address, rooms, contact, created_at) {
            (
                Some(id),
                Some(title),
                Some(description),
                Some(rent),
                Some(address),
                Some(rooms),
                Some(contact),
                Some(created_at),
            ) => Ok(Listing {
                id,
                title,
                description,
                rent,
                address,
                rooms,
                contact,
                created_at,
            }),
            _ => Err(builder.into_errors()),
        }
    }
}

/// Output constraints over a whole result set.
///
/// One bad record fails the set; errors are keyed by record position,
/// e.g. `2.rent`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingArraySchema;

impl Schema for ListingArraySchema {
    type Input = [StoredRecord];
    type Output = Vec<Listing>;

    fn validate(&self, input: &[StoredRecord]) -> Result<Vec<Listing>, Vec<FieldError>> {
        let mut builder = ValidationBuilder::new();
        let mut listings = Vec::with_capacity(input.len());

        for (index, record) in input.iter().enumerate() {
            match ListingOutputSchema.validate(record) {
                Ok(listing) => listings.push(listing),
                Err(errors) => {
                    builder.extend_prefixed(&index.to_string(), errors);
                }
            }
        }

        builder.build().map(|()| listings)
    }
}
