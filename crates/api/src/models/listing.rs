//! Listing domain types.
//!
//! These types represent validated domain objects separate from database row
//! types. `Listing`'s `Serialize` impl is the wire format: every operation
//! that returns a record serializes this struct as a flat JSON object.

use serde::Serialize;

use brewfinder_core::{ListingId, ListingName};

/// A cafe listing (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    /// Unique listing ID, assigned by the store.
    pub id: ListingId,
    /// Unique cafe name.
    pub name: ListingName,
    /// Link to the cafe on a map service.
    pub map_url: String,
    /// Link to a picture of the cafe.
    pub img_url: String,
    /// Location label, matched exactly (case-sensitive) by search.
    pub location: String,
    /// Free-form seating description (e.g., "10-20").
    pub seats: String,
    pub has_sockets: bool,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub can_take_calls: bool,
    /// Coffee price as entered; `null` on the wire when unset.
    pub coffee_price: Option<String>,
}

/// Fields for a listing about to be created (no ID yet).
#[derive(Debug, Clone)]
pub struct NewListing {
    pub name: ListingName,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_sockets: bool,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

/// Coerce an amenity form field to a boolean.
///
/// The form contract is presence-based, not value-based. The full mapping:
///
/// | form input                                            | result  |
/// |-------------------------------------------------------|---------|
/// | field absent                                          | `false` |
/// | field present with an empty value                     | `false` |
/// | field present with any non-empty value (even "false") | `true`  |
#[must_use]
pub fn amenity_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}
