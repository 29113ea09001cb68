//! Fetch execution and retry policy
//!
//! A fetch issues one GET per attempt and classifies failures: timeouts,
//! DNS, TLS, and connection-level errors are transient and retried after a
//! fixed delay; everything else propagates immediately. In HTML-only mode
//! the response content-type is validated and a mismatch is surfaced as a
//! typed skip value, never an error.

use std::time::Duration;
use url::Url;

use crate::config::TlsOptions;
use crate::fetch::client::{build_client, request_headers};
use crate::{PithError, Result};

/// One fetch target, immutable per attempt.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: Url,
    pub timeout: Duration,
    pub tls: TlsOptions,
    /// When set, the response must carry an HTML-ish content-type
    /// (`text/html`, `application/xhtml`, or anything containing `xml`).
    pub html_only: bool,
}

impl FetchRequest {
    pub fn new(url: Url, timeout: Duration, tls: TlsOptions, html_only: bool) -> Self {
        Self {
            url,
            timeout,
            tls,
            html_only,
        }
    }
}

/// A completed response, owned by the caller.
#[derive(Debug)]
pub struct FetchResponse {
    pub status: u16,
    pub reason: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Result of a fetch that did not fail at the network level.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The server answered and (in HTML-only mode) the content-type passed.
    Success(FetchResponse),
    /// HTML-only mode was set and the content-type did not look like a web
    /// page. The caller should skip this URL and continue.
    ContentTypeMismatch { content_type: String },
}

/// Retry budget for transient network failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

/// Issues GET requests with retry on transient failures.
#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    retry: RetryPolicy,
}

impl Fetcher {
    pub fn new(retry: RetryPolicy) -> Self {
        Self { retry }
    }

    /// Fetches a URL, retrying transient network failures up to the
    /// configured budget with a fixed delay between attempts.
    ///
    /// Returns `PithError::Transient` once the budget is exhausted; any
    /// non-transient failure propagates on the first occurrence.
    pub async fn fetch(&self, request: &FetchRequest) -> Result<FetchOutcome> {
        let mut attempt = 1;
        loop {
            match self.attempt(request).await {
                Ok(outcome) => return Ok(outcome),
                Err(PithError::Reqwest(source)) if is_transient(&source) => {
                    if attempt >= self.retry.max_attempts {
                        return Err(PithError::Transient {
                            url: request.url.to_string(),
                            attempts: attempt,
                            source,
                        });
                    }
                    tracing::warn!(
                        "transient failure fetching {} (attempt {}/{}): {}",
                        request.url,
                        attempt,
                        self.retry.max_attempts,
                        source
                    );
                    tokio::time::sleep(self.retry.delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One attempt: fresh client, fresh connection, one GET.
    async fn attempt(&self, request: &FetchRequest) -> Result<FetchOutcome> {
        let client = build_client(request.timeout, &request.tls)?;
        let response = client
            .get(request.url.clone())
            .headers(request_headers(request.html_only))
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if request.html_only && !is_htmlish(&content_type) {
            return Ok(FetchOutcome::ContentTypeMismatch { content_type });
        }

        let body = response.bytes().await?.to_vec();

        Ok(FetchOutcome::Success(FetchResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            content_type,
            body,
        }))
    }
}

/// Transient-failure classification: timeout, DNS, TLS, connection reset,
/// and generic OS-level I/O errors are retry-eligible.
pub(crate) fn is_transient(error: &reqwest::Error) -> bool {
    if error.is_timeout() || error.is_connect() {
        return true;
    }
    // Resets mid-body surface as request/body errors wrapping an io::Error.
    let mut source = std::error::Error::source(error);
    while let Some(err) = source {
        if err.downcast_ref::<std::io::Error>().is_some() {
            return true;
        }
        source = err.source();
    }
    false
}

/// Loose content-type acceptance for HTML-only mode.
///
/// The bare `xml` substring is deliberate: it admits RSS/Atom feeds (and
/// any other XML) exactly like the wider pipeline expects.
pub(crate) fn is_htmlish(content_type: &str) -> bool {
    let ct = content_type.to_lowercase();
    ct.contains("text/html") || ct.contains("application/xhtml") || ct.contains("xml")
}
