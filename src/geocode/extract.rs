//! Postal code extraction from geocoding responses.

use tracing::{debug, warn};

use super::client::{GeocodeError, Geocoder};
use crate::models::{GeocodeResponse, PostalCodeOutcome};

/// Pick the postal code out of a decoded response.
///
/// Only the first result is inspected, and within it the first component
/// whose leading type tag is `postal_code` wins.
pub fn extract_postal_code(response: &GeocodeResponse) -> PostalCodeOutcome {
    if !response.is_ok() {
        return PostalCodeOutcome::ServiceError(response.status.clone());
    }

    response
        .results
        .first()
        .and_then(|result| {
            result
                .address_components
                .iter()
                .find(|component| component.is_postal_code())
        })
        .map(|component| PostalCodeOutcome::Found(component.long_name.clone()))
        .unwrap_or(PostalCodeOutcome::NotFound)
}

impl PostalCodeOutcome {
    pub fn from_fetch(fetched: Result<GeocodeResponse, GeocodeError>) -> Self {
        match fetched {
            Ok(response) => extract_postal_code(&response),
            Err(e) if e.is_transport() => PostalCodeOutcome::TransportError,
            Err(_) => PostalCodeOutcome::MalformedResponse,
        }
    }
}

/// Geocode `address` and reduce the answer to a postal code outcome.
pub async fn lookup_postal_code<G: Geocoder>(geocoder: &G, address: &str) -> PostalCodeOutcome {
    let fetched = geocoder.geocode(address).await;

    match &fetched {
        Err(e) => warn!("Lookup failed for '{}': {}", address, e),
        Ok(response) if !response.is_ok() => warn!(
            "Geocoding service returned status {} for '{}'{}",
            response.status,
            address,
            response
                .error_message
                .as_deref()
                .map(|m| format!(": {}", m))
                .unwrap_or_default()
        ),
        Ok(_) => {}
    }

    let outcome = PostalCodeOutcome::from_fetch(fetched);
    debug!("'{}' -> {:?}", address, outcome);
    outcome
}
