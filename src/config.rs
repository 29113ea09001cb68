//! Run configuration
//!
//! Everything the extraction pipeline and the crawl controller need to know
//! about a run is carried in [`CrawlOptions`], built once by the CLI and
//! never mutated afterwards.

use std::path::PathBuf;
use std::time::Duration;

use crate::{PithError, Result};

/// Closed set of media kinds the extractor understands.
///
/// Each kind maps to its own subdirectory under the save path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    /// Subdirectory name used when persisting media of this kind.
    pub fn subdir(self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Video => "videos",
            MediaKind::Audio => "audio",
        }
    }

    /// Parses a single `--media-types` token (`images`, `videos`, `audio`).
    pub fn from_token(token: &str) -> Option<MediaKind> {
        match token.trim().to_lowercase().as_str() {
            "images" => Some(MediaKind::Image),
            "videos" => Some(MediaKind::Video),
            "audio" => Some(MediaKind::Audio),
            _ => None,
        }
    }
}

/// Parses the comma-separated `--media-types` value into a kind set.
///
/// Unknown tokens are rejected rather than silently ignored so a typo like
/// `--media-types imges` fails fast.
pub fn parse_media_kinds(csv: &str) -> Result<Vec<MediaKind>> {
    let mut kinds = Vec::new();
    for token in csv.split(',') {
        if token.trim().is_empty() {
            continue;
        }
        let kind = MediaKind::from_token(token)
            .ok_or_else(|| PithError::InvalidOption(format!("unknown media type: {token}")))?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}

/// Text flattening mode for the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Depth-first text join with newline separators.
    #[default]
    Plain,
    /// Headings get `#`-prefixes, paragraphs blank lines, list items bullets.
    Structured,
}

/// TLS behavior for outgoing connections.
///
/// A caller-supplied certificate bundle takes precedence over the verify
/// flag: passing a bundle always keeps verification enabled.
#[derive(Debug, Clone, Default)]
pub struct TlsOptions {
    /// When false (and no bundle is set), certificate and hostname checks
    /// are disabled on the default trust context.
    pub no_verify: bool,
    /// Raw PEM bytes of a custom trust bundle, used verbatim.
    pub cert_pem: Option<Vec<u8>>,
}

impl TlsOptions {
    /// Loads a PEM certificate bundle from disk. Implies verification on.
    pub fn with_cert_bundle(path: &std::path::Path) -> Result<Self> {
        let pem = std::fs::read(path).map_err(|e| PithError::Certificate {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            no_verify: false,
            cert_pem: Some(pem),
        })
    }
}

/// Options governing a whole crawl run.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Directory where extracted text and media are persisted.
    pub save_path: PathBuf,
    /// Per-request timeout.
    pub timeout: Duration,
    /// TLS verification mode.
    pub tls: TlsOptions,
    /// Media kinds to extract and download. Empty means text-only.
    pub media_kinds: Vec<MediaKind>,
    /// Text flattening mode.
    pub text_mode: TextMode,
    /// Whether to follow same-domain links breadth-first.
    pub crawl: bool,
    /// Upper bound on pages processed; `None` means unlimited.
    pub crawl_limit: Option<usize>,
    /// When set, paragraphs scoring below this threshold are dropped
    /// before the document is stored.
    pub quality_threshold: Option<f64>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from("."),
            timeout: Duration::from_secs(30),
            tls: TlsOptions::default(),
            media_kinds: vec![MediaKind::Image, MediaKind::Video, MediaKind::Audio],
            text_mode: TextMode::Plain,
            crawl: false,
            crawl_limit: None,
            quality_threshold: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_media_kinds() {
        let kinds = parse_media_kinds("images,videos,audio").unwrap();
        assert_eq!(
            kinds,
            vec![MediaKind::Image, MediaKind::Video, MediaKind::Audio]
        );
    }

    #[test]
    fn parse_media_kinds_trims_and_dedups() {
        let kinds = parse_media_kinds(" images , images ,videos").unwrap();
        assert_eq!(kinds, vec![MediaKind::Image, MediaKind::Video]);
    }

    #[test]
    fn parse_media_kinds_rejects_unknown() {
        assert!(parse_media_kinds("images,scripts").is_err());
    }

    #[test]
    fn parse_media_kinds_empty_csv() {
        assert!(parse_media_kinds("").unwrap().is_empty());
    }

    #[test]
    fn media_kind_subdirs() {
        assert_eq!(MediaKind::Image.subdir(), "images");
        assert_eq!(MediaKind::Video.subdir(), "videos");
        assert_eq!(MediaKind::Audio.subdir(), "audio");
    }
}
