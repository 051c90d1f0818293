//! Environment configuration.

use std::path::PathBuf;

use anyhow::Context;
use quill_core::SCOTCH_BASE;
use url::Url;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `PORT`
    pub port: u16,
    /// `PUBLIC_DIR`
    pub public_dir: PathBuf,
    /// `QUILL_BASE_URL`
    pub base_url: String,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(port) => port.parse().with_context(|| format!("Invalid PORT: {}", port))?,
            None => DEFAULT_PORT,
        };

        let public_dir = lookup("PUBLIC_DIR").map_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR), PathBuf::from);

        let base_url = lookup("QUILL_BASE_URL").unwrap_or_else(|| SCOTCH_BASE.to_string());
        Url::parse(&base_url).with_context(|| format!("Invalid QUILL_BASE_URL: {}", base_url))?;

        Ok(Self { port, public_dir, base_url })
    }
}
