//! Media reference extractor
//!
//! Walks a content subtree for image/video/audio references, resolving each
//! discovered path against the current page. References that fail to
//! resolve are logged and dropped; extraction always continues.

use ego_tree::NodeId;
use scraper::{ElementRef, Html};
use url::Url;

use crate::config::MediaKind;
use crate::urls::resolve_reference;

/// One media resource discovered in a page. Page-scoped: a fresh list is
/// produced per extraction, never carried across pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference {
    pub kind: MediaKind,
    pub url: Url,
}

/// Extracts media references of the allowed kinds from the subtree at
/// `root`, resolved absolute against `page_url`.
pub fn extract_media(
    doc: &Html,
    root: NodeId,
    kinds: &[MediaKind],
    page_url: &Url,
) -> Vec<MediaReference> {
    let mut refs = Vec::new();
    let Some(node) = doc.tree.get(root) else {
        return refs;
    };

    for descendant in node.descendants() {
        let Some(element) = ElementRef::wrap(descendant) else {
            continue;
        };
        match element.value().name() {
            "img" if kinds.contains(&MediaKind::Image) => {
                collect_img(&element, page_url, &mut refs);
            }
            "picture" if kinds.contains(&MediaKind::Image) => {
                collect_picture(&element, page_url, &mut refs);
            }
            "video" if kinds.contains(&MediaKind::Video) => {
                collect_av(&element, MediaKind::Video, page_url, &mut refs);
            }
            "audio" if kinds.contains(&MediaKind::Audio) => {
                collect_av(&element, MediaKind::Audio, page_url, &mut refs);
            }
            _ => {}
        }
    }

    refs
}

/// `src` or `data-src`, plus every candidate in a `srcset` list.
fn collect_img(element: &ElementRef, page_url: &Url, refs: &mut Vec<MediaReference>) {
    let src = element
        .value()
        .attr("src")
        .or_else(|| element.value().attr("data-src"));
    if let Some(src) = src {
        push_resolved(MediaKind::Image, src, page_url, refs);
    }

    if let Some(srcset) = element.value().attr("srcset") {
        for candidate in srcset_candidates(srcset) {
            push_resolved(MediaKind::Image, candidate, page_url, refs);
        }
    }
}

/// First candidate of the first `source[srcset]` child of a `picture`.
fn collect_picture(element: &ElementRef, page_url: &Url, refs: &mut Vec<MediaReference>) {
    let first_source = element
        .children()
        .filter_map(ElementRef::wrap)
        .find(|child| child.value().name() == "source" && child.value().attr("srcset").is_some());

    if let Some(source) = first_source {
        if let Some(srcset) = source.value().attr("srcset") {
            if let Some(candidate) = srcset_candidates(srcset).into_iter().next() {
                push_resolved(MediaKind::Image, candidate, page_url, refs);
            }
        }
    }
}

/// Direct `src` on the element plus `src` on every child `source`.
fn collect_av(
    element: &ElementRef,
    kind: MediaKind,
    page_url: &Url,
    refs: &mut Vec<MediaReference>,
) {
    if let Some(src) = element.value().attr("src") {
        push_resolved(kind, src, page_url, refs);
    }

    for child in element.children().filter_map(ElementRef::wrap) {
        if child.value().name() == "source" {
            if let Some(src) = child.value().attr("src") {
                push_resolved(kind, src, page_url, refs);
            }
        }
    }
}

/// Splits a srcset list into candidate URLs: comma-separated entries, each
/// entry's URL being the token before the first space.
fn srcset_candidates(srcset: &str) -> Vec<&str> {
    srcset
        .split(',')
        .filter_map(|entry| entry.trim().split(' ').next())
        .filter(|candidate| !candidate.is_empty())
        .collect()
}

fn push_resolved(kind: MediaKind, raw: &str, page_url: &Url, refs: &mut Vec<MediaReference>) {
    match resolve_reference(page_url, raw) {
        Ok(url) => refs.push(MediaReference { kind, url }),
        Err(e) => tracing::debug!("could not resolve media path {raw}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::locate::locate_main_content;

    const ALL_KINDS: &[MediaKind] = &[MediaKind::Image, MediaKind::Video, MediaKind::Audio];

    fn extract(html: &str, page: &str, kinds: &[MediaKind]) -> Vec<MediaReference> {
        let doc = Html::parse_document(html);
        let root = locate_main_content(&doc);
        let page_url = Url::parse(page).unwrap();
        extract_media(&doc, root, kinds, &page_url)
    }

    fn urls(refs: &[MediaReference]) -> Vec<&str> {
        refs.iter().map(|r| r.url.as_str()).collect()
    }

    #[test]
    fn srcset_yields_every_candidate() {
        let refs = extract(
            r#"<article><img srcset="a.jpg 1x, b.jpg 2x"></article>"#,
            "http://x.com/p/",
            ALL_KINDS,
        );
        assert_eq!(
            urls(&refs),
            vec!["http://x.com/p/a.jpg", "http://x.com/p/b.jpg"]
        );
    }

    #[test]
    fn img_src_and_data_src() {
        let refs = extract(
            r#"<article><img src="/one.png"><img data-src="two.png"></article>"#,
            "http://x.com/dir/page.html",
            ALL_KINDS,
        );
        assert_eq!(
            urls(&refs),
            vec!["http://x.com/one.png", "http://x.com/dir/two.png"]
        );
    }

    #[test]
    fn picture_takes_first_candidate_of_first_source() {
        let refs = extract(
            r#"<article><picture>
                <source srcset="big.webp 2x, small.webp 1x">
                <source srcset="other.webp">
            </picture></article>"#,
            "http://x.com/",
            ALL_KINDS,
        );
        assert_eq!(urls(&refs), vec!["http://x.com/big.webp"]);
    }

    #[test]
    fn video_src_and_source_children() {
        let refs = extract(
            r#"<article><video src="/clip.mp4"><source src="/clip.webm"></video></article>"#,
            "http://x.com/",
            ALL_KINDS,
        );
        assert_eq!(
            urls(&refs),
            vec!["http://x.com/clip.mp4", "http://x.com/clip.webm"]
        );
        assert!(refs.iter().all(|r| r.kind == MediaKind::Video));
    }

    #[test]
    fn audio_source_children() {
        let refs = extract(
            r#"<article><audio><source src="track.mp3"></audio></article>"#,
            "http://x.com/music/",
            ALL_KINDS,
        );
        assert_eq!(urls(&refs), vec!["http://x.com/music/track.mp3"]);
        assert_eq!(refs[0].kind, MediaKind::Audio);
    }

    #[test]
    fn kinds_are_independently_toggleable() {
        let html = r#"<article>
            <img src="i.png">
            <video src="v.mp4"></video>
            <audio src="a.mp3"></audio>
        </article>"#;
        let refs = extract(html, "http://x.com/", &[MediaKind::Video]);
        assert_eq!(urls(&refs), vec!["http://x.com/v.mp4"]);
    }

    #[test]
    fn empty_kind_set_extracts_nothing() {
        let refs = extract(
            r#"<article><img src="i.png"></article>"#,
            "http://x.com/",
            &[],
        );
        assert!(refs.is_empty());
    }

    #[test]
    fn unresolvable_reference_is_dropped_silently() {
        let refs = extract(
            r#"<article><img src="   "><img src="ok.png"></article>"#,
            "http://x.com/",
            ALL_KINDS,
        );
        assert_eq!(urls(&refs), vec!["http://x.com/ok.png"]);
    }
}
