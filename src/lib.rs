//! Pith: main-content extraction and bounded same-domain crawling
//!
//! This crate fetches web pages, isolates the semantically meaningful main
//! content region, extracts plain text and embedded media references, and
//! optionally follows same-domain links breadth-first across a bounded,
//! deduplicated set of pages.

pub mod config;
pub mod crawl;
pub mod extract;
pub mod fetch;
pub mod quality;
pub mod store;
pub mod urls;

use thiserror::Error;

/// Main error type for Pith operations
#[derive(Debug, Error)]
pub enum PithError {
    /// A transient network failure that survived the whole retry budget.
    /// Transient means: timeout, DNS failure, TLS error, connection reset,
    /// or a generic OS-level I/O error.
    #[error("network failure for {url} after {attempts} attempts: {source}")]
    Transient {
        url: String,
        attempts: u32,
        source: reqwest::Error,
    },

    #[error("failed to load certificate bundle {path}: {message}")]
    Certificate { path: String, message: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("failed to parse URL: {0}")]
    Parse(String),

    #[error("invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("missing host in URL")]
    MissingHost,

    #[error("malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for Pith operations
pub type Result<T> = std::result::Result<T, PithError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{CrawlOptions, MediaKind, TextMode, TlsOptions};
pub use crawl::{CrawlSummary, Crawler};
pub use extract::PageExtraction;
pub use fetch::{FetchOutcome, FetchRequest, FetchResponse, Fetcher, RetryPolicy};
pub use quality::{QualityScore, QualityScorer, SimilarityModel};
pub use urls::{normalize_for_dedup, resolve_reference};
