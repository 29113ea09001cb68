//! Main-content locator
//!
//! Tries a fixed priority list of selectors; the first hit terminates the
//! search, so ties cannot occur. Falls back to `body`, then to the whole
//! document. Deterministic, no backtracking.

use std::sync::LazyLock;

use ego_tree::NodeId;
use scraper::{Html, Selector};

/// Selectors tried in priority order.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    r#"[role="main"]"#,
    ".article-content",
    ".post-content",
    ".entry-content",
    "#content",
    ".content",
    "#main",
    ".main",
];

static COMPILED_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    CONTENT_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .collect()
});

static BODY_SELECTOR: LazyLock<Option<Selector>> =
    LazyLock::new(|| Selector::parse("body").ok());

/// Finds the node most likely to hold the page's primary prose.
pub fn locate_main_content(doc: &Html) -> NodeId {
    for selector in COMPILED_SELECTORS.iter() {
        if let Some(element) = doc.select(selector).next() {
            tracing::debug!("located main content via selector: {:?}", selector);
            return element.id();
        }
    }

    if let Some(selector) = BODY_SELECTOR.as_ref() {
        if let Some(body) = doc.select(selector).next() {
            return body.id();
        }
    }

    doc.tree.root().id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::ElementRef;

    fn tag_of(doc: &Html, id: NodeId) -> Option<String> {
        doc.tree
            .get(id)
            .and_then(ElementRef::wrap)
            .map(|el| el.value().name().to_string())
    }

    #[test]
    fn article_wins_over_class_content() {
        let doc = Html::parse_document(
            r#"<html><body><div class="content">side</div><article>main</article></body></html>"#,
        );
        let id = locate_main_content(&doc);
        assert_eq!(tag_of(&doc, id).as_deref(), Some("article"));
    }

    #[test]
    fn role_main_beats_class_selectors() {
        let doc = Html::parse_document(
            r#"<html><body><div class="post-content">a</div><div role="main">b</div></body></html>"#,
        );
        let id = locate_main_content(&doc);
        let el = ElementRef::wrap(doc.tree.get(id).unwrap()).unwrap();
        assert_eq!(el.value().attr("role"), Some("main"));
    }

    #[test]
    fn id_content_matches() {
        let doc = Html::parse_document(
            r#"<html><body><div id="content">hello</div></body></html>"#,
        );
        let id = locate_main_content(&doc);
        let el = ElementRef::wrap(doc.tree.get(id).unwrap()).unwrap();
        assert_eq!(el.value().attr("id"), Some("content"));
    }

    #[test]
    fn falls_back_to_body() {
        let doc = Html::parse_document(r"<html><body><p>plain</p></body></html>");
        let id = locate_main_content(&doc);
        assert_eq!(tag_of(&doc, id).as_deref(), Some("body"));
    }

    #[test]
    fn first_match_terminates_search() {
        let doc = Html::parse_document(
            r"<html><body><article>one</article><main>two</main></body></html>",
        );
        let id = locate_main_content(&doc);
        assert_eq!(tag_of(&doc, id).as_deref(), Some("article"));
    }
}
