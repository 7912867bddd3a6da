//! Geocoding API response schema.

use serde::{Deserialize, Serialize};

/// Status value the service returns for a successful lookup
pub const STATUS_OK: &str = "OK";

/// Type tag marking a postal code component
pub const POSTAL_CODE_TYPE: &str = "postal_code";

/// Top-level body of a geocoding response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<AddressResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// One candidate match for the queried address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressResult {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
}

/// Tagged sub-part of a result (street, city, postal code, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

impl GeocodeResponse {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

impl AddressComponent {
    /// Only the first type tag decides what a component is.
    pub fn is_postal_code(&self) -> bool {
        self.types.first().map(String::as_str) == Some(POSTAL_CODE_TYPE)
    }
}
