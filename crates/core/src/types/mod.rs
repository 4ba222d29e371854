//! Core types for Brewfinder.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod name;

pub use id::*;
pub use name::{ListingName, ListingNameError};
