//! Geocoding client and postal code extraction.

mod client;
mod extract;

pub use client::{GeocodeClient, GeocodeError, Geocoder};
pub use extract::{extract_postal_code, lookup_postal_code};
