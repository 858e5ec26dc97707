//! Error types for the taxon archive

use std::fmt;

#[derive(Debug)]
pub enum TaxaError {
    /// Red List API error
    Api(redlist_api::RedlistError),
    /// Cache file I/O error
    Io(std::io::Error),
    /// Cache file contents do not match the expected layout
    Cache(String),
    /// Configuration error
    Config(String),
}

impl fmt::Display for TaxaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "{}", e),
            Self::Io(e) => write!(f, "Cache I/O error: {}", e),
            Self::Cache(msg) => write!(f, "Cache format error: {}", msg),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for TaxaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Cache(_) | Self::Config(_) => None,
        }
    }
}

impl From<redlist_api::RedlistError> for TaxaError {
    fn from(e: redlist_api::RedlistError) -> Self {
        Self::Api(e)
    }
}

impl From<std::io::Error> for TaxaError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<tracing_subscriber::filter::ParseError> for TaxaError {
    fn from(e: tracing_subscriber::filter::ParseError) -> Self {
        Self::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TaxaError>;
