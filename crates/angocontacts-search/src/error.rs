use angocontacts_core::ConfigError;
use thiserror::Error;

/// Errors returned by a [`crate::SearchProvider`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("search endpoint {url} returned HTTP {status}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid search endpoint '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
