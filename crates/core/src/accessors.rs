//! Element accessors: the leaves of every field extractor.
//!
//! Accessors read one thing from a [`Queryable`] and never fail. Absent
//! elements, absent attributes, and blank text all read as [`ExtractedValue::Null`].

use crate::parse::Queryable;
use crate::value::ExtractedValue;

fn non_blank(text: Option<String>) -> ExtractedValue {
    match text {
        Some(text) if !text.trim().is_empty() => ExtractedValue::Text(text.trim().to_string()),
        _ => ExtractedValue::Null,
    }
}

/// Trimmed text content, or `Null` when empty or nothing is selected.
pub fn inner_text<'a, Q: Queryable<'a>>(node: &Q) -> ExtractedValue {
    non_blank(node.text_content())
}

/// Returns an accessor for the named attribute.
///
/// ```rust
/// use quill_core::accessors::attribute;
/// use quill_core::parse::Document;
///
/// let doc = Document::parse(r#"<a href="/x">x</a>"#).unwrap();
/// let href = attribute("href");
/// assert_eq!(href(&doc.select("a").unwrap()).as_str(), Some("/x"));
/// ```
pub fn attribute<'a, Q: Queryable<'a>>(name: &str) -> impl Fn(&Q) -> ExtractedValue + '_ {
    move |node| attribute_of(node, name)
}

/// Non-curried form of [`attribute`].
pub fn attribute_of<'a, Q: Queryable<'a>>(node: &Q, name: &str) -> ExtractedValue {
    node.attribute(name).map_or(ExtractedValue::Null, ExtractedValue::Text)
}

/// Trimmed text of the first child node, or `Null`.
///
/// Reads a heading's own text without the badges nested after it.
pub fn leading_text<'a, Q: Queryable<'a>>(node: &Q) -> ExtractedValue {
    non_blank(node.leading_text())
}
