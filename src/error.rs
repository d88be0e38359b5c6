//! Error types for the harvester.

use thiserror::Error;

/// Main error type for the harvester library.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// HTTP request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-retryable HTTP status (4xx other than 429).
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Retry budget exhausted on a transient failure.
    #[error("Giving up after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Invalid classification pattern set.
    #[error("Invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The listing endpoint yielded no publications at all.
    #[error("No publications available from the listing endpoint")]
    NoData,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, HarvesterError>;
