//! Document access: retrieving a page and parsing it.
//!
//! The core only needs a [`Transport`] that turns a URL into a page body and
//! reports failures with a status. [`HttpTransport`] is the reqwest-backed
//! implementation used by the binaries.

use std::future::Future;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use url::Url;

use crate::parse::Document;
use crate::sanitize::enforce_https;
use crate::value::ExtractedValue;
use crate::{QuillError, Result};

/// HTTP client configuration for fetching pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; Quill/0.1)".to_string() }
    }
}

/// Retrieves raw page bodies.
///
/// Failures must be reported as [`QuillError::Fetch`] (or another variant whose
/// [`QuillError::status`] is meaningful). Implementations do not retry.
pub trait Transport {
    fn get(&self, url: &str) -> impl Future<Output = Result<String>>;
}

/// Fetches `url` over https and parses the body.
///
/// The scheme is forced to https before the request. One failed request is one
/// failed call; there is no retry.
///
/// # Errors
///
/// [`QuillError::InvalidUrl`] when the URL does not parse, otherwise whatever
/// the transport reports.
pub async fn fetch_document<T: Transport + ?Sized>(transport: &T, url: &str) -> Result<Document> {
    let secure = enforce_https(ExtractedValue::from(url))
        .into_text()
        .unwrap_or_default();
    let parsed = Url::parse(&secure).map_err(|e| QuillError::InvalidUrl(format!("{}: {}", secure, e)))?;

    tracing::debug!(url = %parsed, "fetching document");
    let body = transport.get(parsed.as_str()).await?;
    tracing::debug!(url = %parsed, bytes = body.len(), "fetched document");

    Document::parse_with_url(&body, parsed)
}

/// reqwest-backed [`Transport`].
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: FetchConfig,
}

#[cfg(feature = "fetch")]
impl HttpTransport {
    /// Builds a client with the configured timeout and user agent.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, config })
    }

    fn classify(&self, err: reqwest::Error, url: &str) -> QuillError {
        if err.is_timeout() {
            QuillError::Timeout { timeout: self.config.timeout }
        } else {
            let status = err.status().map_or(crate::error::DEFAULT_STATUS, |s| s.as_u16());
            QuillError::Fetch { status, url: url.to_string() }
        }
    }
}

#[cfg(feature = "fetch")]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| self.classify(e, url))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "request failed");
            return Err(QuillError::Fetch { status: status.as_u16(), url: url.to_string() });
        }

        response.text().await.map_err(|e| self.classify(e, url))
    }
}
