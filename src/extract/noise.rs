//! Noise filter
//!
//! Strips non-content elements from a content subtree: a fixed tag
//! blacklist, excluded ARIA roles, and class/id attribute patterns that
//! indicate navigation or UI chrome. Elements are collected during one
//! traversal and detached in a second pass; mutating the tree during
//! traversal would invalidate traversal state.

use std::sync::LazyLock;

use ego_tree::NodeId;
use regex::Regex;
use scraper::{ElementRef, Html};

/// Tags removed unconditionally.
const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "noscript", "iframe", "form",
    "button", "dialog",
];

/// ARIA roles marking navigation and UI regions.
const EXCLUDED_ROLES: &[&str] = &["navigation", "banner", "complementary", "contentinfo"];

/// Class/id tokens that indicate navigation or UI components. Tested
/// against the space-joined, case-folded concatenation of `class` and `id`.
static NOISE_CLASS_ID: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"sidebar",
        r"menu",
        r"nav[-_]",
        r"breadcrumb",
        r"pagination",
        r"advertisement",
        r"ad[-_]",
        r"banner",
        r"popup",
        r"modal",
        r"widget",
        r"comment[-_]?(?:s|section)?",
        r"related",
        r"newsletter",
        r"social[-_]",
        r"share[-_]",
        r"sticky",
        r"overlay",
        r"toolbar",
    ]
    .iter()
    .filter_map(|p| Regex::new(&format!("(?i){p}")).ok())
    .collect()
});

/// Removes noise elements beneath `root`. Returns how many subtrees were
/// detached. Idempotent: running it again removes nothing further.
pub fn filter_noise(doc: &mut Html, root: NodeId) -> usize {
    let mut doomed: Vec<NodeId> = Vec::new();

    if let Some(node) = doc.tree.get(root) {
        // skip(1): the content node itself is never removed
        for descendant in node.descendants().skip(1) {
            if let Some(element) = ElementRef::wrap(descendant) {
                if is_noise(&element) {
                    doomed.push(descendant.id());
                }
            }
        }
    }

    let removed = doomed.len();
    for id in doomed {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }

    if removed > 0 {
        tracing::debug!("filtered {} navigation/UI elements", removed);
    }
    removed
}

/// Removal criteria, cheapest first: tag blacklist, then ARIA role, then
/// class/id pattern matching.
fn is_noise(element: &ElementRef) -> bool {
    if EXCLUDED_TAGS.contains(&element.value().name()) {
        return true;
    }

    if let Some(role) = element.value().attr("role") {
        let role = role.to_ascii_lowercase();
        if EXCLUDED_ROLES.contains(&role.as_str()) {
            return true;
        }
    }

    let class = element.value().attr("class").unwrap_or("");
    let id = element.value().attr("id").unwrap_or("");
    if class.is_empty() && id.is_empty() {
        return false;
    }

    let combined = format!("{class} {id}").trim().to_lowercase();
    NOISE_CLASS_ID.iter().any(|pattern| pattern.is_match(&combined))
}
