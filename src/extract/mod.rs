//! Page extraction pipeline
//!
//! Orchestrates per-page extraction: locate the main content node, strip
//! noise from it, then pull media references and normalized text out of the
//! cleaned region. Link extraction runs over the full document, before any
//! filtering. Each call produces a fresh [`PageExtraction`]; nothing is
//! shared between pages.

pub mod feed;
pub mod links;
pub mod locate;
pub mod media;
pub mod noise;
pub mod text;

use scraper::Html;
use url::Url;

use crate::config::{MediaKind, TextMode};

pub use media::MediaReference;

/// Everything extracted from one page. Strictly page-scoped.
#[derive(Debug, Default)]
pub struct PageExtraction {
    /// Normalized text; empty string means the page had no content.
    pub text: String,
    /// Media references discovered in the cleaned content region.
    pub media: Vec<MediaReference>,
    /// Outbound links (fragment-stripped), populated only when requested.
    pub links: Vec<Url>,
}

/// Runs the full extraction pipeline over one fetched page body.
///
/// `seed` is the crawl origin: only links whose host matches it exactly are
/// collected. Pass `None` to skip link extraction entirely.
pub fn extract_page(
    body: &str,
    page_url: &Url,
    kinds: &[MediaKind],
    mode: TextMode,
    seed: Option<&Url>,
) -> PageExtraction {
    let mut doc = Html::parse_document(body);

    let links = match seed {
        Some(seed) => links::extract_links(&doc, page_url, seed),
        None => Vec::new(),
    };

    if feed::is_feed(&doc) {
        tracing::debug!("document is a feed, extracting item text");
        return PageExtraction {
            text: text::scrub(&feed::extract_feed_text(&doc)),
            media: Vec::new(),
            links,
        };
    }

    let root = locate::locate_main_content(&doc);
    noise::filter_noise(&mut doc, root);

    let media = if kinds.is_empty() {
        Vec::new()
    } else {
        media::extract_media(&doc, root, kinds, page_url)
    };

    let text = text::normalize(&doc, root, mode);

    PageExtraction { text, media, links }
}
