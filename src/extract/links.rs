//! Same-host link extraction
//!
//! Collects `a[href]` targets from a full document, resolves them against
//! the current page, strips fragments, and keeps only links on exactly the
//! same host and port as the crawl seed. Cross-host links and non-HTTP
//! schemes never enter the frontier.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::urls::{resolve_reference, same_host};

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("ANCHOR selector"));

/// Extracts crawlable same-host links from `doc`, resolved against
/// `page_url`. Deduplicated within the page, in document order.
pub fn extract_links(doc: &Html, page_url: &Url, seed: &Url) -> Vec<Url> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut links: Vec<Url> = Vec::new();

    for anchor in doc.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
        {
            continue;
        }

        let Ok(mut url) = resolve_reference(page_url, href) else {
            tracing::debug!("skipping unresolvable link {href}");
            continue;
        };
        url.set_fragment(None);

        if !same_host(&url, seed) {
            continue;
        }
        if seen.insert(url.to_string()) {
            links.push(url);
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(html: &str, page: &str, seed: &str) -> Vec<String> {
        let doc = Html::parse_document(html);
        let page_url = Url::parse(page).unwrap();
        let seed_url = Url::parse(seed).unwrap();
        extract_links(&doc, &page_url, &seed_url)
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn same_host_links_kept_cross_host_dropped() {
        let found = links(
            r#"<a href="/local">in</a><a href="http://other.com/x">out</a>"#,
            "http://x.com/",
            "http://x.com/",
        );
        assert_eq!(found, vec!["http://x.com/local"]);
    }

    #[test]
    fn fragments_stripped_and_deduplicated() {
        let found = links(
            r##"<a href="/page#top">a</a><a href="/page#bottom">b</a><a href="/page">c</a>"##,
            "http://x.com/",
            "http://x.com/",
        );
        assert_eq!(found, vec!["http://x.com/page"]);
    }

    #[test]
    fn non_navigable_schemes_skipped() {
        let found = links(
            r##"<a href="#">a</a><a href="javascript:void(0)">b</a>
                <a href="mailto:a@x.com">c</a><a href="">d</a><a href="/real">e</a>"##,
            "http://x.com/",
            "http://x.com/",
        );
        assert_eq!(found, vec!["http://x.com/real"]);
    }

    #[test]
    fn relative_links_resolve_against_page_directory() {
        let found = links(
            r#"<a href="next.html">n</a>"#,
            "http://x.com/blog/post.html",
            "http://x.com/",
        );
        assert_eq!(found, vec!["http://x.com/blog/next.html"]);
    }

    #[test]
    fn port_must_match_exactly() {
        let found = links(
            r#"<a href="http://x.com:8080/p">p</a>"#,
            "http://x.com/",
            "http://x.com/",
        );
        assert!(found.is_empty());
    }

    #[test]
    fn query_strings_survive() {
        let found = links(
            r#"<a href="/search?q=rust">q</a>"#,
            "http://x.com/",
            "http://x.com/",
        );
        assert_eq!(found, vec!["http://x.com/search?q=rust"]);
    }
}
