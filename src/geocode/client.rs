//! Google Maps geocoding client.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::GeocoderConfig;
use crate::models::GeocodeResponse;

const USER_AGENT: &str = concat!("postal-lookup/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("invalid geocoder endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("geocoding request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("geocoding service returned HTTP {0}")]
    HttpStatus(StatusCode),

    #[error("malformed geocoding response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<reqwest::Error> for GeocodeError {
    // reqwest errors print their request URL, and ours carries the API key
    fn from(e: reqwest::Error) -> Self {
        GeocodeError::Transport(e.without_url())
    }
}

impl GeocodeError {
    /// True when the request never produced a usable HTTP response.
    pub fn is_transport(&self) -> bool {
        !matches!(self, GeocodeError::Malformed(_))
    }
}

/// Anything that can turn an address into a geocoding response
pub trait Geocoder {
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<GeocodeResponse, GeocodeError>>;
}

/// HTTP client bound to one endpoint and API key
#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl GeocodeClient {
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let endpoint = Url::parse(&config.endpoint)?;

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(GeocodeError::ClientBuild)?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Request URL for `address`, whose words may already be joined with `+`.
    ///
    /// The value keeps the leading `+` the service has always been queried
    /// with; everything outside the form-urlencoded safe set is percent-encoded.
    pub fn request_url(&self, address: &str) -> Url {
        let words = address.replace('+', " ");

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("address", &format!(" {}", words))
            .append_pair("key", &self.api_key);
        url
    }
}

impl Geocoder for GeocodeClient {
    async fn geocode(&self, address: &str) -> Result<GeocodeResponse, GeocodeError> {
        // The full URL carries the key, so only the endpoint is logged.
        debug!("Geocoding '{}' via {}", address, self.endpoint);

        let response = self.client.get(self.request_url(address)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::HttpStatus(status));
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}
