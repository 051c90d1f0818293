//! Fan-out over repeated elements.
//!
//! [`extract_all`] applies a per-element extractor to every element of a
//! [`Selection`] in document order. With [`CollectionExtractor::then`] the
//! resulting list is handed to a post-processor instead, which is how a list of
//! [`KeyedFragment`]s becomes one merged record.
//!
//! # Example
//!
//! ```rust
//! use quill_core::collect::extract_all;
//! use quill_core::parse::{Document, Element};
//!
//! # futures::executor::block_on(async {
//! let doc = Document::parse("<ul><li>a</li><li>b</li></ul>").unwrap();
//! let items = doc.select("li").unwrap();
//!
//! let texts = extract_all(|el: &Element<'_>| Ok(el.text())).extract(&items).await.unwrap();
//! assert_eq!(texts, ["a", "b"]);
//!
//! let joined = extract_all(|el: &Element<'_>| Ok(el.text()))
//!     .then(|texts: Vec<String>| texts.join(","))
//!     .extract(&items)
//!     .await
//!     .unwrap();
//! assert_eq!(joined, "a,b");
//! # });
//! ```

use crate::Result;
use crate::parse::{Element, Selection};
use crate::sanitize::from_pairs_to_record;
use crate::value::{ExtractedValue, KeyedFragment, Record};

/// Applies a per-element extractor across a selection.
#[derive(Debug, Clone, Copy)]
pub struct CollectionExtractor<F> {
    per_element: F,
}

/// A [`CollectionExtractor`] whose results go through a post-processor.
#[derive(Debug, Clone, Copy)]
pub struct PostProcessed<F, P> {
    per_element: F,
    post: P,
}

/// Builds a collection extractor from a per-element extractor.
pub fn extract_all<F>(per_element: F) -> CollectionExtractor<F> {
    CollectionExtractor { per_element }
}

impl<F> CollectionExtractor<F> {
    /// Passes the extracted list through `post` before returning it.
    pub fn then<P>(self, post: P) -> PostProcessed<F, P> {
        PostProcessed { per_element: self.per_element, post }
    }

    /// Extracts one value per element, in selection order.
    ///
    /// An empty selection yields an empty list. The first per-element failure
    /// is returned.
    pub async fn extract<'a, T>(&self, elements: &Selection<'a>) -> Result<Vec<T>>
    where
        F: Fn(&Element<'a>) -> Result<T>,
    {
        tracing::trace!(count = elements.len(), "extracting collection");
        elements.iter().map(&self.per_element).collect()
    }
}

impl<F, P> PostProcessed<F, P> {
    /// Extracts one value per element, then applies the post-processor.
    pub async fn extract<'a, T, R>(&self, elements: &Selection<'a>) -> Result<R>
    where
        F: Fn(&Element<'a>) -> Result<T>,
        P: Fn(Vec<T>) -> R,
    {
        tracing::trace!(count = elements.len(), "extracting collection");
        let items = elements.iter().map(&self.per_element).collect::<Result<Vec<T>>>()?;
        Ok((self.post)(items))
    }
}

/// Merges keyed fragments in order, dropping unresolved ones.
///
/// Later fragments win on key collision; keys keep their first position.
pub fn merge_fragments(fragments: Vec<KeyedFragment>) -> Record {
    from_pairs_to_record(ExtractedValue::from(fragments))
        .into_record()
        .unwrap_or_default()
}
