//! Postal Lookup - Canadian postal codes from the Google Maps Geocoding API
//!
//! This library provides shared types and modules for the single-address and batch binaries.

pub mod config;
pub mod driver;
pub mod geocode;
pub mod models;
pub mod normalize;

pub use config::{Config, GeocoderConfig};
pub use geocode::{GeocodeClient, Geocoder};
pub use models::{OutputFormat, PostalCodeOutcome};
