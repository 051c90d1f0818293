//! Field extractors for scotch.io profile pages.
//!
//! A [`Field`] pairs an accessor with a sanitizing [`Pipeline`], so most fields
//! are declared rather than written. The social, stat and post extractors below
//! combine several fields over the sub-tree of one container element.

use std::sync::LazyLock;

use regex::Regex;

use crate::accessors::{attribute_of, inner_text, leading_text};
use crate::compose::{Pipeline, Stage, compose};
use crate::parse::{Element, Queryable, Selection};
use crate::profile::PostRecord;
use crate::sanitize::{enforce_https, lowercase, parse_integer, resolve_site_url, sanitize_numeric_string, snake_case};
use crate::value::{ExtractedValue, KeyedFragment};
use crate::Result;

static SOCIAL_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:icon|color)-(.+)$").expect("social class pattern is valid"));

/// What a [`Field`] reads before sanitizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    /// Trimmed text content.
    Text,
    /// Trimmed text of the first child node.
    LeadingText,
    /// A named attribute.
    Attribute(String),
}

/// An accessor followed by a sanitizing pipeline.
///
/// # Example
///
/// ```rust
/// use quill_core::fields::Field;
/// use quill_core::parse::Document;
///
/// let doc = Document::parse(r#"<a title="Views"><span>1,024</span></a>"#).unwrap();
/// let views = doc.select("a[title='Views'] span").unwrap();
/// assert_eq!(Field::number().read_integer(&views).unwrap(), Some(1024));
/// ```
#[derive(Debug, Clone)]
pub struct Field {
    accessor: Accessor,
    pipeline: Pipeline,
}

impl Field {
    pub fn new(accessor: Accessor, stages: impl IntoIterator<Item = Stage>) -> Self {
        Self { accessor, pipeline: compose(stages) }
    }

    pub fn text() -> Self {
        Self::new(Accessor::Text, [])
    }

    pub fn leading_text() -> Self {
        Self::new(Accessor::LeadingText, [])
    }

    pub fn lowercase_text() -> Self {
        Self::new(Accessor::Text, [Stage::func(lowercase)])
    }

    /// Text → digits only → leading integer. Unparseable text reads as `null`.
    pub fn number() -> Self {
        Self::new(Accessor::Text, [Stage::func(parse_integer), Stage::func(sanitize_numeric_string)])
    }

    /// An attribute holding a URL, forced to https.
    pub fn url_attribute(name: &str) -> Self {
        Self::new(Accessor::Attribute(name.to_string()), [Stage::func(enforce_https)])
    }

    /// An attribute holding a site path, resolved against `base` and forced to https.
    pub fn site_url_attribute(name: &str, base: &str) -> Self {
        Self::new(
            Accessor::Attribute(name.to_string()),
            [Stage::func(enforce_https), Stage::func(resolve_site_url(base))],
        )
    }

    /// Reads and sanitizes the field.
    ///
    /// # Errors
    ///
    /// Fails only when the pipeline is misconfigured.
    pub fn read<'a, Q: Queryable<'a>>(&self, node: &Q) -> Result<ExtractedValue> {
        let raw = match &self.accessor {
            Accessor::Text => inner_text(node),
            Accessor::LeadingText => leading_text(node),
            Accessor::Attribute(name) => attribute_of(node, name),
        };
        self.pipeline.apply(raw)
    }

    pub fn read_text<'a, Q: Queryable<'a>>(&self, node: &Q) -> Result<Option<String>> {
        self.read(node).map(ExtractedValue::into_text)
    }

    pub fn read_integer<'a, Q: Queryable<'a>>(&self, node: &Q) -> Result<Option<i64>> {
        self.read(node).map(ExtractedValue::into_integer)
    }
}

fn social_class_tokens(classes: ExtractedValue) -> Vec<String> {
    classes
        .as_str()
        .unwrap_or_default()
        .split_whitespace()
        .filter(|class| SOCIAL_CLASS.is_match(class))
        .map(str::to_string)
        .collect()
}

fn resolve_social_key(tokens: Vec<String>) -> Option<String> {
    let first = tokens.first()?;
    let name = SOCIAL_CLASS.captures(first)?.get(1)?.as_str();
    let key = snake_case(name);
    (!key.is_empty()).then_some(key)
}

/// Platform key for an icon class list such as `"icon-twitter color-blue"`.
///
/// The first `icon-*` or `color-*` token names the platform.
pub fn social_key(classes: ExtractedValue) -> Option<String> {
    crate::compose!(resolve_social_key, social_class_tokens)(classes)
}

/// `{ platform: href }` for one social link.
///
/// The link's `span.icon` names the platform; without a platform class the
/// fragment is unresolved.
pub fn social_fragment(link: &Element<'_>) -> Result<KeyedFragment> {
    let icon = link.select("span.icon")?;
    let href = Field::url_attribute("href").read(link)?;
    let key = crate::compose!(social_key, |icon: &Selection<'_>| attribute_of(icon, "class"))(&icon);

    Ok(KeyedFragment::new(key, href))
}

/// `{ label: number }` for one profile stat.
///
/// The label is lowercased; a stat without a label is unresolved.
pub fn stat_fragment(container: &Element<'_>) -> Result<KeyedFragment> {
    let stat = Field::number().read(&container.select(".stat")?)?;
    let label = Field::lowercase_text().read_text(&container.select(".label")?)?;

    Ok(KeyedFragment::new(label, stat))
}

/// Returns an extractor for one post card, resolving links against `base`.
pub fn post_record(base: &str) -> impl Fn(&Element<'_>) -> Result<PostRecord> {
    let text = Field::text();
    let link = Field::site_url_attribute("href", base);
    let image = Field::url_attribute("data-src");
    let number = Field::number();

    move |card: &Element<'_>| {
        let title = card.select(".card__title a")?;

        Ok(PostRecord {
            title: text.read_text(&title)?,
            image: image.read_text(&card.select("a[data-src]")?)?,
            url: link.read_text(&title)?,
            views: number.read_integer(&card.select("a[title='Views'] span")?)?,
            comments: number.read_integer(&card.select("a[title='Comments'] span.comment-number")?)?,
        })
    }
}
