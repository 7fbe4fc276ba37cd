use thiserror::Error;

/// Errors produced by the HTTP client layer.
///
/// The public discovery operations absorb these per the fail-soft contract
/// ([`crate::GeocodeClient::validate_zip`] returns `false`,
/// [`crate::PlaceFinder::find_places`] degrades to its fallback), so this
/// type mostly surfaces in logs and in client-level unit tests.
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
