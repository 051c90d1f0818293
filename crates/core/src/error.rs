//! Error types for Quill operations.
//!
//! This module defines the main error type [`QuillError`]. Fetch failures carry
//! the upstream status so a boundary can pass it through; missing fields are
//! never errors and show up as `null` in the extracted record instead.
//!
//! # Example
//!
//! ```rust
//! use quill_core::{QuillError, Result};
//!
//! fn require_author(name: &str) -> Result<&str> {
//!     if name.is_empty() {
//!         return Err(QuillError::InvalidUrl("empty author name".to_string()));
//!     }
//!     Ok(name)
//! }
//! ```

use thiserror::Error;

/// Status reported for failures that carry no upstream HTTP status.
pub const DEFAULT_STATUS: u16 = 500;

/// Main error type for fetching and extraction.
///
/// # Example
///
/// ```rust
/// use quill_core::QuillError;
///
/// let err = QuillError::Fetch { status: 404, url: "https://scotch.io/@nobody".to_string() };
/// assert_eq!(err.status(), 404);
/// ```
#[derive(Error, Debug)]
pub enum QuillError {
    /// The page could not be retrieved.
    ///
    /// Covers non-2xx responses (with the upstream status) and transport
    /// failures such as DNS or connection errors (status 500).
    #[error("Request for {url} failed with status {status}")]
    Fetch { status: u16, url: String },

    /// HTTP client errors from reqwest that carry no response.
    #[cfg(feature = "fetch")]
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A CSS selector could not be parsed.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// A pipeline stage is not callable.
    ///
    /// This is a configuration defect, reported when the offending stage is
    /// reached rather than when the pipeline is built.
    #[error("Pipeline stage {position} ({stage}) is not a function")]
    TypeConfiguration { position: usize, stage: String },

    /// Output rendering errors.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl QuillError {
    /// The status code a boundary should report for this error.
    ///
    /// Fetch failures pass the upstream status through; every other failure
    /// maps to [`DEFAULT_STATUS`].
    pub fn status(&self) -> u16 {
        match self {
            QuillError::Fetch { status, .. } => *status,
            _ => DEFAULT_STATUS,
        }
    }
}

/// Result type alias for QuillError.
pub type Result<T> = std::result::Result<T, QuillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuillError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_fetch_status_passthrough() {
        let err = QuillError::Fetch { status: 404, url: "https://scotch.io/@nobody".to_string() };
        assert_eq!(err.status(), 404);
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_default_status() {
        assert_eq!(QuillError::Timeout { timeout: 30 }.status(), 500);
        assert_eq!(QuillError::InvalidSelector("[[".to_string()).status(), 500);
    }

    #[test]
    fn test_type_configuration_message() {
        let err = QuillError::TypeConfiguration { position: 2, stage: "nope".to_string() };
        assert!(err.to_string().contains("nope"));
        assert!(err.to_string().contains('2'));
    }
}
