//! Error types shared between both scrapers.
//!
//! The `ScrapeError` enum unifies the failure cases of the fetch and persist
//! layers. The price parser itself never fails and does not appear here.
use std::io;

use thiserror::Error;

/// Unified error type shared by the scrapers.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// I/O error while writing output files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Transport-level HTTP failure (connection, TLS, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote API answered with a non-success status code.
    #[error("Unexpected HTTP status {status}: {body}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// Response body, kept for diagnostics.
        body: String,
    },

    /// A required setting (token, API key) was not provided.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),
}

impl ScrapeError {
    /// Returns `true` when the remote API rejected the request with a status code,
    /// as opposed to a transport or local failure.
    pub fn is_status(&self) -> bool {
        matches!(self, ScrapeError::Status { .. })
    }
}
