//! Error types for us-census

use thiserror::Error;

/// Main error type for us-census operations
#[derive(Error, Debug)]
pub enum CensusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("No API key configured. Pass --key, set CENSUS_API_KEY, or run `us-census config init`")]
    MissingApiKey,

    #[error("Census API error ({status}): {message}")]
    Api {
        /// HTTP status returned by the API
        status: u16,
        /// Dataset-specific hint for the failed request
        message: String,
    },

    #[error("Unexpected response from Census API: {0}")]
    InvalidResponse(String),

    #[error("Invalid estimate span '{0}': only 1, 3, or 5 year estimates are published")]
    InvalidEstimate(u8),

    #[error("Invalid table group '{0}'")]
    InvalidGroup(String),

    #[error("Invalid NAICS sector '{0}'")]
    InvalidSector(String),

    #[error("Invalid geography: {0}")]
    InvalidGeography(String),

    #[error("Invalid time period: {0}")]
    InvalidTimePeriod(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Offline mode: {0}")]
    Offline(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for us-census operations
pub type Result<T> = std::result::Result<T, CensusError>;

impl CensusError {
    /// Create a new API error from a status code and hint message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a new invalid response error
    pub fn response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a new geography error
    pub fn geography(msg: impl Into<String>) -> Self {
        Self::InvalidGeography(msg.into())
    }
}
