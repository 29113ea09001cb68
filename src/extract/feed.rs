//! RSS/Atom feed text extraction
//!
//! The loose content-type check admits feeds, so documents carrying an
//! `rss`/`feed`/`channel` element get their text pulled from each item or
//! entry instead of running the main-content locator.
//!
//! Limitation: descriptions wrapped in CDATA sections are lost, because the
//! document is parsed with an HTML tokenizer rather than an XML one.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static FEED_MARKERS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["rss", "feed", "channel"]
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .collect()
});

static ITEM_SELECTOR: LazyLock<Option<Selector>> = LazyLock::new(|| Selector::parse("item").ok());
static ENTRY_SELECTOR: LazyLock<Option<Selector>> = LazyLock::new(|| Selector::parse("entry").ok());

static TEXT_FIELDS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    // The colon in content:encoded must be escaped to parse as a tag name.
    ["title", "description", "summary", "content", r"content\:encoded"]
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .collect()
});

/// True when the document looks like an RSS or Atom feed.
pub fn is_feed(doc: &Html) -> bool {
    FEED_MARKERS
        .iter()
        .any(|selector| doc.select(selector).next().is_some())
}

/// Extracts the text of every feed item/entry, blank-line separated.
/// Falls back to all document text when no items are present.
pub fn extract_feed_text(doc: &Html) -> String {
    let mut items: Vec<ElementRef> = Vec::new();
    if let Some(selector) = ITEM_SELECTOR.as_ref() {
        items.extend(doc.select(selector));
    }
    if items.is_empty() {
        if let Some(selector) = ENTRY_SELECTOR.as_ref() {
            items.extend(doc.select(selector));
        }
    }

    if items.is_empty() {
        return doc
            .root_element()
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut parts: Vec<String> = Vec::new();
    for item in items {
        for field in TEXT_FIELDS.iter() {
            if let Some(element) = item.select(field).next() {
                let text = element
                    .text()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                if !text.is_empty() {
                    parts.push(text);
                }
            }
        }
    }
    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rss_document_detected_as_feed() {
        let doc = Html::parse_document(
            r"<rss><channel><item><title>Headline</title></item></channel></rss>",
        );
        assert!(is_feed(&doc));
    }

    #[test]
    fn plain_html_is_not_a_feed() {
        let doc =
            Html::parse_document(r"<html><body><article>hello</article></body></html>");
        assert!(!is_feed(&doc));
    }

    #[test]
    fn item_titles_and_descriptions_extracted() {
        let doc = Html::parse_document(
            r"<rss><channel>
                <item><title>First story</title><description>Summary one</description></item>
                <item><title>Second story</title><description>Summary two</description></item>
            </channel></rss>",
        );
        let text = extract_feed_text(&doc);
        assert!(text.contains("First story"));
        assert!(text.contains("Summary one"));
        assert!(text.contains("Second story"));
        assert!(text.contains("Summary two"));
    }

    #[test]
    fn content_encoded_bodies_extracted() {
        let doc = Html::parse_document(
            r"<rss><channel><item>
                <title>Story</title>
                <content:encoded>Full article body here</content:encoded>
            </item></channel></rss>",
        );
        let text = extract_feed_text(&doc);
        assert!(text.contains("Story"));
        assert!(text.contains("Full article body here"));
    }

    #[test]
    fn atom_entries_extracted() {
        let doc = Html::parse_document(
            r"<feed><entry><title>Atom post</title><summary>Atom summary</summary></entry></feed>",
        );
        let text = extract_feed_text(&doc);
        assert!(text.contains("Atom post"));
        assert!(text.contains("Atom summary"));
    }
}
