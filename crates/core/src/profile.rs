//! Author profile assembly.
//!
//! [`assemble_profile`] runs seven independent sub-extractions over a parsed
//! profile page and gathers them into a [`ProfileRecord`]. A missing anchor
//! only empties the fields that depend on it. [`fetch_author_profile`] puts
//! the page fetch in front of it.

use std::future::Future;

use serde::Serialize;

use crate::collect::{extract_all, merge_fragments};
use crate::compose::compose_async_fn;
use crate::config::ProfileConfig;
use crate::fetch::{Transport, fetch_document};
use crate::fields::{Field, post_record, social_fragment, stat_fragment};
use crate::parse::{Document, Queryable, Selection};
use crate::value::Record;
use crate::Result;

/// One card of the author's post grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostRecord {
    pub title: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub views: Option<i64>,
    pub comments: Option<i64>,
}

/// Everything extracted from one profile page.
///
/// Fields serialize in declaration order. Absent scalars are `null`, absent
/// collections are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileRecord {
    pub author: Option<String>,
    pub role: Option<String>,
    pub url: Option<String>,
    pub avatar: Option<String>,
    pub social: Record,
    pub stats: Record,
    pub posts: Vec<PostRecord>,
}

/// Structural anchors of a profile page.
struct Anchors<'a> {
    hero: Selection<'a>,
    grid: Selection<'a>,
    og_url: Selection<'a>,
}

impl<'a> Anchors<'a> {
    fn locate(doc: &'a Document) -> Result<Self> {
        let main = doc.select("#site__main")?;

        Ok(Self {
            hero: main.find("section.hero--scotch")?,
            grid: main.find("section.super-grid")?,
            og_url: doc.select("meta[property='og:url']")?,
        })
    }
}

async fn author_name(hero: &Selection<'_>) -> Result<Option<String>> {
    Field::leading_text().read_text(&hero.find(".profile__name h1.title")?)
}

async fn author_role(hero: &Selection<'_>) -> Result<Option<String>> {
    let title = hero.find(".profile__name h1.title")?;
    Field::text().read_text(&title.select_within(".tag")?)
}

async fn canonical_url(meta: &Selection<'_>) -> Result<Option<String>> {
    Field::url_attribute("content").read_text(meta)
}

async fn avatar(hero: &Selection<'_>) -> Result<Option<String>> {
    Field::url_attribute("src").read_text(&hero.find("img.profile__avatar")?)
}

async fn social_links(hero: &Selection<'_>) -> Result<Record> {
    let links = hero.find(".author-links a[target='_blank']")?;
    extract_all(social_fragment).then(merge_fragments).extract(&links).await
}

async fn stats(hero: &Selection<'_>) -> Result<Record> {
    let stats = hero.find(".profile__stats .profile__stat")?;
    extract_all(stat_fragment).then(merge_fragments).extract(&stats).await
}

async fn posts(grid: &Selection<'_>, base: &str) -> Result<Vec<PostRecord>> {
    let cards = grid.find(".super-grid__item [data-type='post']")?;
    extract_all(post_record(base)).extract(&cards).await
}

/// Extracts a [`ProfileRecord`] from a parsed profile page.
///
/// The sub-extractions are joined on the current task; the first failure
/// is returned and the rest are dropped. Missing elements are not failures.
///
/// # Example
///
/// ```rust
/// use quill_core::{Document, ProfileConfig, assemble_profile};
///
/// # futures::executor::block_on(async {
/// let doc = Document::parse("<html><body></body></html>").unwrap();
/// let profile = assemble_profile(&doc, &ProfileConfig::default()).await.unwrap();
///
/// assert_eq!(profile.author, None);
/// assert!(profile.posts.is_empty());
/// # });
/// ```
pub async fn assemble_profile(doc: &Document, config: &ProfileConfig) -> Result<ProfileRecord> {
    let anchors = Anchors::locate(doc)?;

    join_profile(
        author_name(&anchors.hero),
        author_role(&anchors.hero),
        canonical_url(&anchors.og_url),
        avatar(&anchors.hero),
        social_links(&anchors.hero),
        stats(&anchors.hero),
        posts(&anchors.grid, &config.base_url),
    )
    .await
}

async fn join_profile(
    author: impl Future<Output = Result<Option<String>>>,
    role: impl Future<Output = Result<Option<String>>>,
    url: impl Future<Output = Result<Option<String>>>,
    avatar: impl Future<Output = Result<Option<String>>>,
    social: impl Future<Output = Result<Record>>,
    stats: impl Future<Output = Result<Record>>,
    posts: impl Future<Output = Result<Vec<PostRecord>>>,
) -> Result<ProfileRecord> {
    let (author, role, url, avatar, social, stats, posts) =
        futures::try_join!(author, role, url, avatar, social, stats, posts)?;

    tracing::debug!(
        author = author.as_deref().unwrap_or("-"),
        social = social.len(),
        stats = stats.len(),
        posts = posts.len(),
        "assembled profile"
    );

    Ok(ProfileRecord { author, role, url, avatar, social, stats, posts })
}

/// Fetches `author`'s profile page and extracts it.
///
/// The name is lowercased into the canonical profile URL. Fetch and
/// extraction failures are returned unchanged.
pub async fn fetch_author_profile<T: Transport + ?Sized>(
    transport: &T,
    config: &ProfileConfig,
    author: &str,
) -> Result<ProfileRecord> {
    let run = compose_async_fn(
        move |doc: Document| async move { assemble_profile(&doc, config).await },
        move |url: String| async move { fetch_document(transport, &url).await },
    );

    run(config.profile_url(author)).await
}

/// Like [`fetch_author_profile`], also reading the page's meta tags through
/// `mapping` (see [`Document::meta_record`]).
pub async fn fetch_author_profile_with_meta<T: Transport + ?Sized>(
    transport: &T,
    config: &ProfileConfig,
    author: &str,
    mapping: &[(&str, &str)],
) -> Result<(ProfileRecord, Record)> {
    let run = compose_async_fn(
        move |doc: Document| async move {
            let profile = assemble_profile(&doc, config).await;
            profile.and_then(|profile| doc.meta_record(mapping).map(|meta| (profile, meta)))
        },
        move |url: String| async move { fetch_document(transport, &url).await },
    );

    run(config.profile_url(author)).await
}
