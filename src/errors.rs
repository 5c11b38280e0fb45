//! Error types for the billcheap-rs library.
//!
//! Expected user-correctable conditions (empty catalogs, amount/operator
//! mismatches) are modeled as result variants in [`crate::flow`], not as
//! errors. The variants here cover collaborator faults and malformed input.

use thiserror::Error;

/// Main error type for catalog and flow operations.
#[derive(Error, Debug)]
pub enum BillcheapError {
    /// Error during HTTP request/response handling
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing URL
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Aggregator authentication failed or a token was rejected
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Aggregator returned a non-success status
    #[error("Aggregator error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the aggregator.
        status: u16,
        /// Response body or status text.
        message: String,
    },

    /// Invalid payment token address
    #[error("Invalid token address: {0}")]
    InvalidAddress(String),

    /// Invalid amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

/// Result type alias for catalog and flow operations.
pub type Result<T> = std::result::Result<T, BillcheapError>;
