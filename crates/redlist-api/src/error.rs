//! Error types for the Red List API client

use std::fmt;

/// Errors that can occur when interacting with the Red List API
#[derive(Debug)]
pub enum RedlistError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// Failed to parse JSON response
    Json(serde_json::Error),
}

impl fmt::Display for RedlistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "Red List HTTP error: {}", e),
            Self::Json(e) => write!(f, "Red List JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for RedlistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for RedlistError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for RedlistError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for Red List API operations
pub type Result<T> = std::result::Result<T, RedlistError>;
