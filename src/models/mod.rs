//! Data models for geocoding responses and lookup results.

pub mod outcome;
pub mod response;

pub use outcome::{OutputFormat, PostalCodeOutcome};
pub use response::{AddressComponent, AddressResult, GeocodeResponse};
