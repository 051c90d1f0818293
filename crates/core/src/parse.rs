//! HTML parsing and selector queries.
//!
//! This module provides the [`Document`], [`Element`] and [`Selection`] types
//! over `scraper`. Extractors only see them through the [`Queryable`] trait:
//! scoped selection, text, and attributes.
//!
//! # Example
//!
//! ```rust
//! use quill_core::parse::{Document, Queryable};
//!
//! let html = r#"
//!     <section class="hero">
//!         <h1 class="title">Chris Sev <span class="tag">Admin</span></h1>
//!     </section>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let hero = doc.select("section.hero").unwrap();
//! let role = hero.select_within(".tag").unwrap();
//! assert_eq!(role.text_content().as_deref(), Some("Admin"));
//! ```

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::value::{ExtractedValue, Record};
use crate::{QuillError, Result};

/// Read-only capabilities extractors rely on.
///
/// Implemented by single elements and by selections of zero or more elements.
/// An empty selection answers `None` to every read.
pub trait Queryable<'a> {
    /// Selects descendants matching `selector`, in document order.
    fn select_within(&self, selector: &str) -> Result<Selection<'a>>;

    /// Text content, untrimmed. `None` when nothing is selected.
    fn text_content(&self) -> Option<String>;

    /// Value of the named attribute. `None` when absent.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Text of the first child node. `None` when there is none.
    fn leading_text(&self) -> Option<String>;
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| QuillError::InvalidSelector(format!("{}: {}", selector, e)))
}

/// Represents a parsed HTML document.
///
/// # Example
///
/// ```rust
/// use quill_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
    source_url: Option<Url>,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing is lenient: malformed markup still yields a document.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html, source_url: None })
    }

    /// Parses HTML and remembers the URL it was fetched from.
    pub fn parse_with_url(html: &str, url: Url) -> Result<Self> {
        let mut doc = Self::parse(html)?;
        doc.source_url = Some(url);
        Ok(doc)
    }

    /// The URL the document was fetched from, if known.
    pub fn source_url(&self) -> Option<&Url> {
        self.source_url.as_ref()
    }

    /// Selects elements anywhere in the document.
    ///
    /// # Errors
    ///
    /// Returns [`QuillError::InvalidSelector`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use quill_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&self, selector: &str) -> Result<Selection<'_>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).map(Element::new).collect())
    }

    /// Gets the title of the document.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    /// Values of `attr` on every `<meta>` whose `name` or `property` is `name`.
    ///
    /// Tags without the attribute are skipped.
    pub fn meta_values(&self, name: &str, attr: &str) -> Result<Vec<String>> {
        let selector = format!("meta[name='{name}'], meta[property='{name}']");
        Ok(self
            .select(&selector)?
            .iter()
            .filter_map(|meta| meta.attr(attr).map(str::to_string))
            .collect())
    }

    /// Builds a record of meta `content` values from `(key, meta name)` pairs.
    ///
    /// A key ending in `*` collects every matching value into a list under the
    /// key without the star; other keys take the first value, or `null`.
    /// Repeated keys keep their first position.
    pub fn meta_record(&self, mapping: &[(&str, &str)]) -> Result<Record> {
        let mut record = Record::new();

        for (key, name) in mapping {
            let values = self.meta_values(name, "content")?;
            let value = match key.strip_suffix('*') {
                Some(key) => (key, ExtractedValue::from(values)),
                None => (*key, ExtractedValue::from(values.into_iter().next())),
            };
            record.insert(value.0.to_string(), value.1);
        }

        Ok(record)
    }
}

/// A single element of a parsed document.
///
/// # Example
///
/// ```rust
/// use quill_core::parse::Document;
///
/// let html = r#"<a href="https://example.com">Link text</a>"#;
/// let doc = Document::parse(html).unwrap();
/// let links = doc.select("a").unwrap();
/// let link = links.first().unwrap();
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// Concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Text of the first child node, whether it is a text node or an element.
    ///
    /// For `<h1>Chris Sev <span>Admin</span></h1>` this is `"Chris Sev "`.
    pub fn leading_text(&self) -> Option<String> {
        let first = self.element.first_child()?;

        if let Some(text) = first.value().as_text() {
            return Some(String::from(&**text));
        }

        ElementRef::wrap(first).map(|el| el.text().collect())
    }

    /// Selects descendants using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`QuillError::InvalidSelector`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Selection<'a>> {
        let sel = compile(selector)?;
        Ok(self.element.select(&sel).map(Element::new).collect())
    }
}

impl<'a> Queryable<'a> for Element<'a> {
    fn select_within(&self, selector: &str) -> Result<Selection<'a>> {
        self.select(selector)
    }

    fn text_content(&self) -> Option<String> {
        Some(self.text())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attr(name).map(str::to_string)
    }

    fn leading_text(&self) -> Option<String> {
        Element::leading_text(self)
    }
}

/// Zero or more elements, in document order.
#[derive(Clone, Debug, Default)]
pub struct Selection<'a> {
    elements: Vec<Element<'a>>,
}

impl<'a> Selection<'a> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn first(&self) -> Option<&Element<'a>> {
        self.elements.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element<'a>> {
        self.elements.iter()
    }

    /// Descendants of every selected element matching `selector`.
    ///
    /// An element reached through two nested parents is returned once.
    pub fn find(&self, selector: &str) -> Result<Selection<'a>> {
        let sel = compile(selector)?;
        let mut seen = HashSet::new();

        Ok(self
            .elements
            .iter()
            .flat_map(|parent| parent.element.select(&sel))
            .filter(|el| seen.insert(el.id()))
            .map(Element::new)
            .collect())
    }
}

impl<'a> FromIterator<Element<'a>> for Selection<'a> {
    fn from_iter<I: IntoIterator<Item = Element<'a>>>(iter: I) -> Self {
        Self { elements: iter.into_iter().collect() }
    }
}

impl<'s, 'a> IntoIterator for &'s Selection<'a> {
    type Item = &'s Element<'a>;
    type IntoIter = std::slice::Iter<'s, Element<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<'a> Queryable<'a> for Selection<'a> {
    fn select_within(&self, selector: &str) -> Result<Selection<'a>> {
        self.find(selector)
    }

    /// Concatenated text of all selected elements.
    fn text_content(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(self.elements.iter().map(Element::text).collect())
    }

    /// Attribute of the first selected element.
    fn attribute(&self, name: &str) -> Option<String> {
        self.first().and_then(|el| el.attribute(name))
    }

    /// [`Element::leading_text`] of the first selected element.
    fn leading_text(&self) -> Option<String> {
        self.first().and_then(Element::leading_text)
    }
}
