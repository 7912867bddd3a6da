//! Result of a single postal code lookup.

/// Legacy sentinel for "no postal code" and transport failures
pub const SENTINEL_NOT_FOUND: &str = "-1";

/// Legacy sentinel for failures reported by the service itself
pub const SENTINEL_REQUEST_FAILED: &str = "-2";

/// What a lookup produced for one address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostalCodeOutcome {
    /// Postal code display value
    Found(String),
    /// Successful response without a postal code component
    NotFound,
    /// The HTTP request itself failed
    TransportError,
    /// The service answered with a non-OK status
    ServiceError(String),
    /// The body was not a geocoding response
    MalformedResponse,
}

/// How outcomes are written to stdout and output files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Postal code, `-1` or `-2`
    #[default]
    Legacy,
    /// Postal code or a label naming the failure
    Tagged,
}

impl PostalCodeOutcome {
    pub fn postal_code(&self) -> Option<&str> {
        match self {
            PostalCodeOutcome::Found(code) => Some(code),
            _ => None,
        }
    }

    /// Two-valued sentinel encoding shared with existing output files.
    pub fn sentinel(&self) -> &str {
        match self {
            PostalCodeOutcome::Found(code) => code,
            PostalCodeOutcome::NotFound | PostalCodeOutcome::TransportError => SENTINEL_NOT_FOUND,
            PostalCodeOutcome::ServiceError(_) | PostalCodeOutcome::MalformedResponse => {
                SENTINEL_REQUEST_FAILED
            }
        }
    }

    /// Unambiguous label, one per variant.
    pub fn tagged(&self) -> String {
        match self {
            PostalCodeOutcome::Found(code) => code.clone(),
            PostalCodeOutcome::NotFound => "not_found".to_string(),
            PostalCodeOutcome::TransportError => "transport_error".to_string(),
            PostalCodeOutcome::ServiceError(status) => format!("service_error:{}", status),
            PostalCodeOutcome::MalformedResponse => "malformed_response".to_string(),
        }
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Legacy => self.sentinel().to_string(),
            OutputFormat::Tagged => self.tagged(),
        }
    }
}

impl std::fmt::Display for PostalCodeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sentinel())
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Legacy => write!(f, "legacy"),
            OutputFormat::Tagged => write!(f, "tagged"),
        }
    }
}
