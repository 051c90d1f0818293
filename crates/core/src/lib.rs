//! Declarative extraction of author profiles from scotch.io pages.
//!
//! Pages are parsed into a [`Document`] and projected into a [`ProfileRecord`]
//! by small composable pieces: accessors read values, sanitizer pipelines
//! clean them, collection extractors fan out over repeated elements, and
//! [`assemble_profile`] joins the independent fields into one record.
//!
//! # Example
//!
//! ```rust
//! use quill_core::{Document, ProfileConfig, assemble_profile};
//!
//! let html = r#"
//!     <main id="site__main">
//!         <section class="hero--scotch">
//!             <div class="profile__name"><h1 class="title">Chris Sev <span class="tag">Admin</span></h1></div>
//!         </section>
//!     </main>
//! "#;
//!
//! # futures::executor::block_on(async {
//! let doc = Document::parse(html).unwrap();
//! let profile = assemble_profile(&doc, &ProfileConfig::default()).await.unwrap();
//! assert_eq!(profile.author.as_deref(), Some("Chris Sev"));
//! assert_eq!(profile.role.as_deref(), Some("Admin"));
//! # });
//! ```

pub mod accessors;
pub mod collect;
pub mod compose;
pub mod config;
pub mod error;
pub mod fetch;
pub mod fields;
pub mod parse;
pub mod profile;
pub mod response;
pub mod sanitize;
pub mod value;

pub use collect::{CollectionExtractor, extract_all, merge_fragments};
pub use compose::{AsyncPipeline, AsyncStage, Pipeline, Stage, compose, compose_async, compose_async_fn};
pub use config::{ProfileConfig, ProfileConfigBuilder, SCOTCH_BASE};
pub use error::{QuillError, Result};
#[cfg(feature = "fetch")]
pub use fetch::HttpTransport;
pub use fetch::{FetchConfig, Transport, fetch_document};
pub use fields::{Accessor, Field};
pub use parse::{Document, Element, Queryable, Selection};
pub use profile::{PostRecord, ProfileRecord, assemble_profile, fetch_author_profile, fetch_author_profile_with_meta};
pub use response::Envelope;
pub use value::{ExtractedValue, KeyedFragment, Record};

/// Open graph tags reported by `meta_record` callers such as the CLI.
pub const PROFILE_META: &[(&str, &str)] = &[
    ("title", "og:title"),
    ("url", "og:url"),
    ("banner", "og:image"),
    ("description", "og:description"),
    ("type", "og:type"),
    ("tags*", "article_tags"),
];

/// Fetches and extracts a profile over HTTP with default settings.
///
/// # Errors
///
/// Returns the fetch or extraction error unchanged.
#[cfg(feature = "fetch")]
pub async fn fetch_profile(author: &str) -> Result<ProfileRecord> {
    let config = ProfileConfig::default();
    let transport = HttpTransport::new(config.fetch.clone())?;
    fetch_author_profile(&transport, &config, author).await
}
