//! Domain models for the listing service.

pub mod listing;

pub use listing::{Listing, NewListing, amenity_flag};
