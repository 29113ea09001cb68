//! Text normalizer
//!
//! Converts a filtered content subtree to clean text. Anchors contribute
//! only their inner text (link targets are never emitted), whitespace is
//! collapsed, and literal URLs are stripped from the result. Empty output
//! means "no content", not an error.

use std::sync::LazyLock;

use ego_tree::NodeId;
use regex::Regex;
use scraper::{ElementRef, Html, Node};

pub use crate::config::TextMode;

// URL matching components shared by the removal patterns.
const URL_PROTOCOL: &str = r"(?:https?|ftp)://|www\.";
const URL_CHARS: &str = r"[a-zA-Z0-9\-._~:/?#@!$&'()*+,;=%]+";

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n+").expect("BLANK_LINES regex"));

static MULTI_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("MULTI_SPACE regex"));

static URL_IN_PARENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\(\s*(?:{URL_PROTOCOL}){URL_CHARS}\s*\)"))
        .expect("URL_IN_PARENS regex")
});

static URL_IN_BRACKETS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\[\s*(?:{URL_PROTOCOL}){URL_CHARS}\s*\]"))
        .expect("URL_IN_BRACKETS regex")
});

static URL_STANDALONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(?:{URL_PROTOCOL}){URL_CHARS}")).expect("URL_STANDALONE regex")
});

static EMPTY_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*\)").expect("EMPTY_PARENS regex"));

static EMPTY_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*\]").expect("EMPTY_BRACKETS regex"));

/// Flattens the subtree at `root` to normalized text.
pub fn normalize(doc: &Html, root: NodeId, mode: TextMode) -> String {
    let raw = match mode {
        TextMode::Plain => plain_text(doc, root),
        TextMode::Structured => structured_text(doc, root),
    };
    scrub(&raw)
}

/// Whitespace collapse followed by literal-URL removal. Used for both DOM
/// extraction output and feed text.
pub fn scrub(text: &str) -> String {
    let collapsed = BLANK_LINES.replace_all(text, "\n\n");
    let collapsed = MULTI_SPACE.replace_all(&collapsed, " ");
    remove_urls(collapsed.trim())
}

/// Depth-first text join with newline separators.
fn plain_text(doc: &Html, root: NodeId) -> String {
    let Some(node) = doc.tree.get(root) else {
        return String::new();
    };
    let mut parts: Vec<&str> = Vec::new();
    for descendant in node.descendants() {
        if let Node::Text(text) = descendant.value() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed);
            }
        }
    }
    parts.join("\n")
}

/// Structured flattening: headings emit `#`-prefixes, paragraphs blank
/// lines, list items a bullet.
fn structured_text(doc: &Html, root: NodeId) -> String {
    let Some(node) = doc.tree.get(root) else {
        return String::new();
    };
    let mut parts: Vec<String> = Vec::new();
    for descendant in node.descendants() {
        let Some(element) = ElementRef::wrap(descendant) else {
            continue;
        };
        match element.value().name() {
            name @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6") => {
                let level = name[1..].parse::<usize>().unwrap_or(1);
                parts.push(format!("\n\n{} {}\n", "#".repeat(level), inner_text(&element)));
            }
            "p" => parts.push(format!("\n{}\n", inner_text(&element))),
            "li" => parts.push(format!("\u{2022} {}\n", inner_text(&element))),
            _ => {}
        }
    }
    parts.concat()
}

/// Inner text of one element, per-node trimmed and space-joined.
fn inner_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Removes literal URLs from text: first URLs wrapped in parentheses or
/// brackets (together with the enclosing punctuation), then any remaining
/// standalone occurrences, then the empty `()`/`[]` pairs left behind.
fn remove_urls(text: &str) -> String {
    let text = URL_IN_PARENS.replace_all(text, "");
    let text = URL_IN_BRACKETS.replace_all(&text, "");
    let text = URL_STANDALONE.replace_all(&text, "");
    let text = EMPTY_PARENS.replace_all(&text, "");
    let text = EMPTY_BRACKETS.replace_all(&text, "");
    let text = MULTI_SPACE.replace_all(&text, " ");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::locate::locate_main_content;

    fn plain(html: &str) -> String {
        let doc = Html::parse_document(html);
        let root = locate_main_content(&doc);
        normalize(&doc, root, TextMode::Plain)
    }

    fn structured(html: &str) -> String {
        let doc = Html::parse_document(html);
        let root = locate_main_content(&doc);
        normalize(&doc, root, TextMode::Structured)
    }

    #[test]
    fn anchor_text_kept_target_discarded() {
        let text = plain(r#"<article><p>Read <a href="http://x.com/more">the details</a> here</p></article>"#);
        assert!(text.contains("the details"));
        assert!(!text.contains("http"));
        assert!(!text.contains("x.com"));
    }

    #[test]
    fn parenthesized_url_removed_with_punctuation() {
        let text = scrub("See (https://example.com/page)");
        assert!(text.contains("See"));
        assert!(!text.contains("http"));
        assert!(!text.contains("("));
    }

    #[test]
    fn bracketed_url_removed() {
        let text = scrub("Source [http://example.com/a] cited");
        assert_eq!(text, "Source cited");
    }

    #[test]
    fn bare_www_url_removed() {
        let text = scrub("Visit www.example.com/path for more");
        assert!(!text.contains("www"));
        assert!(text.contains("Visit"));
        assert!(text.contains("for more"));
    }

    #[test]
    fn ftp_url_removed() {
        let text = scrub("Mirror at ftp://files.example.com/pub today");
        assert!(!text.contains("ftp"));
        assert!(text.contains("Mirror at"));
    }

    #[test]
    fn blank_line_runs_collapse_to_one() {
        let text = scrub("alpha\n\n\n\nbeta");
        assert_eq!(text, "alpha\n\nbeta");
    }

    #[test]
    fn space_runs_collapse_to_one() {
        let text = scrub("alpha     beta");
        assert_eq!(text, "alpha beta");
    }

    #[test]
    fn whitespace_only_yields_empty_string() {
        let text = plain(r"<article>   <span>  </span>  </article>");
        assert_eq!(text, "");
    }

    #[test]
    fn structured_mode_marks_headings_and_bullets() {
        let text = structured(
            r"<article><h2>Section</h2><p>Body text.</p><ul><li>first</li><li>second</li></ul></article>",
        );
        assert!(text.contains("## Section"));
        assert!(text.contains("Body text."));
        assert!(text.contains("\u{2022} first"));
        assert!(text.contains("\u{2022} second"));
    }

    #[test]
    fn plain_mode_joins_with_newlines() {
        let text = plain(r"<article><p>one</p><p>two</p></article>");
        assert_eq!(text, "one\ntwo");
    }
}
