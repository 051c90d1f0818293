//! JSON response envelope.
//!
//! Successful extractions serialize as `{"status":"success","data":...}` and
//! failures as `{"status":"failure","code":404,"message":"Not found."}`. The
//! message never carries upstream error details.

use serde::Serialize;

use crate::error::DEFAULT_STATUS;
use crate::{QuillError, Result};

/// Outcome of one request, ready to be written as JSON.
///
/// # Example
///
/// ```rust
/// use quill_core::{Envelope, QuillError};
///
/// let failed: Envelope<()> = Envelope::from_result(Err(QuillError::Fetch {
///     status: 404,
///     url: "https://scotch.io/@nobody".to_string(),
/// }));
///
/// assert_eq!(failed.code(), 404);
/// assert_eq!(
///     serde_json::to_string(&failed).unwrap(),
///     r#"{"status":"failure","code":404,"message":"Not found."}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success { data: T },
    Failure { code: u16, message: String },
}

/// Client-facing message for a failure status.
pub fn failure_message(code: u16) -> &'static str {
    match code {
        404 => "Not found.",
        _ => "Request failed.",
    }
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Envelope::Success { data }
    }

    /// A failure envelope. Codes outside the HTTP error range become 500.
    pub fn failure(code: u16) -> Self {
        let code = if (400..600).contains(&code) { code } else { DEFAULT_STATUS };
        Envelope::Failure { code, message: failure_message(code).to_string() }
    }

    /// Wraps an extraction result. Errors keep their status.
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::from_error(&err),
        }
    }

    pub fn from_error(err: &QuillError) -> Self {
        Self::failure(err.status())
    }

    /// HTTP status to answer with.
    pub fn code(&self) -> u16 {
        match self {
            Envelope::Success { .. } => 200,
            Envelope::Failure { code, .. } => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }
}
