//! Extraction configuration.

use crate::fetch::FetchConfig;

/// Origin of the profile site.
pub const SCOTCH_BASE: &str = "https://scotch.io";

/// Configuration for profile fetching and extraction.
///
/// # Example
///
/// ```rust
/// use quill_core::ProfileConfig;
///
/// let config = ProfileConfig::builder()
///     .base_url("https://scotch.io/")
///     .timeout(10)
///     .build();
///
/// assert_eq!(config.profile_url("Chris"), "https://scotch.io/@chris");
/// ```
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Site origin used for profile URLs and site-relative links (default: scotch.io).
    pub base_url: String,

    /// HTTP settings for the page fetch.
    pub fetch: FetchConfig,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self { base_url: SCOTCH_BASE.to_string(), fetch: FetchConfig::default() }
    }
}

impl ProfileConfig {
    /// Creates a new builder for ProfileConfig.
    pub fn builder() -> ProfileConfigBuilder {
        ProfileConfigBuilder::new()
    }

    /// Canonical profile URL for an author. Names are lowercased.
    pub fn profile_url(&self, author: &str) -> String {
        format!("{}/@{}", self.base_url.trim_end_matches('/'), author.to_lowercase())
    }
}

/// Builder for ProfileConfig.
pub struct ProfileConfigBuilder {
    config: ProfileConfig,
}

impl ProfileConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ProfileConfig::default() }
    }

    /// Sets the site origin.
    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.config.base_url = value.into();
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout(mut self, value: u64) -> Self {
        self.config.fetch.timeout = value;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Builds the config.
    pub fn build(self) -> ProfileConfig {
        self.config
    }
}

impl Default for ProfileConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
