//! HTTP client construction
//!
//! Each fetch attempt gets a client with connection pooling disabled so a
//! retry never reuses a half-poisoned connection, plus a browser-like
//! header set with a User-Agent drawn from a small fixed pool.

use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE,
    CACHE_CONTROL, CONNECTION, PRAGMA, USER_AGENT};
use reqwest::{Certificate, Client};
use std::time::Duration;

use crate::config::TlsOptions;
use crate::{PithError, Result};

/// Small fixed User-Agent pool, rotated per attempt to reduce trivial
/// fingerprinting.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (iPhone; CPU iPhone OS 12_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/12.1 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (Linux; Android 7.1.1; Moto G (5S) Build/NPPS26.102-49-11) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/68.0.3440.91 Mobile Safari/537.36",
    "Mozilla/5.0 (iPad; CPU OS 12_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_6) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/11.1.2 Safari/605.1.15",
    "Opera/9.80 (Windows NT 6.1; WOW64) Presto/2.12.388 Version/12.18",
];

/// Accept value used when only HTML (or a feed) is acceptable.
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Builds a client for one fetch attempt.
///
/// Pooling is disabled so every attempt opens a fresh connection. TLS
/// behavior follows [`TlsOptions`]: a custom trust bundle is used verbatim
/// (verification stays on), otherwise certificate checks are disabled only
/// when verification was explicitly turned off.
pub fn build_client(timeout: Duration, tls: &TlsOptions) -> Result<Client> {
    let mut builder = Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(0);

    if let Some(pem) = &tls.cert_pem {
        let cert = Certificate::from_pem(pem).map_err(|e| PithError::Certificate {
            path: "<bundle>".to_string(),
            message: e.to_string(),
        })?;
        builder = builder.add_root_certificate(cert);
    } else if tls.no_verify {
        builder = builder.danger_accept_invalid_certs(true);
    }

    Ok(builder.build()?)
}

/// Builds the header set for one attempt.
///
/// `Accept-Encoding: identity` is mandatory: this layer never decompresses,
/// so compressed transfer encodings must be refused up front.
pub fn request_headers(html_only: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();

    let agent = USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0]);
    if let Ok(value) = HeaderValue::from_str(agent) {
        headers.insert(USER_AGENT, value);
    }

    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert("Expires", HeaderValue::from_static("0"));

    if html_only {
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    } else {
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    }

    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_only_accept_header() {
        let headers = request_headers(true);
        assert_eq!(headers.get(ACCEPT).unwrap(), ACCEPT_HTML);
    }

    #[test]
    fn unrestricted_accept_header() {
        let headers = request_headers(false);
        assert_eq!(headers.get(ACCEPT).unwrap(), "*/*");
    }

    #[test]
    fn identity_encoding_always_requested() {
        for html_only in [true, false] {
            let headers = request_headers(html_only);
            assert_eq!(headers.get(ACCEPT_ENCODING).unwrap(), "identity");
        }
    }

    #[test]
    fn user_agent_comes_from_pool() {
        let headers = request_headers(true);
        let ua = headers.get(USER_AGENT).unwrap().to_str().unwrap();
        assert!(USER_AGENTS.contains(&ua));
    }

    #[test]
    fn build_client_default_tls() {
        let client = build_client(Duration::from_secs(5), &TlsOptions::default());
        assert!(client.is_ok());
    }

    #[test]
    fn build_client_no_verify() {
        let tls = TlsOptions {
            no_verify: true,
            cert_pem: None,
        };
        assert!(build_client(Duration::from_secs(5), &tls).is_ok());
    }

    #[test]
    fn build_client_rejects_garbage_bundle() {
        let tls = TlsOptions {
            no_verify: false,
            cert_pem: Some(b"not a pem".to_vec()),
        };
        assert!(build_client(Duration::from_secs(5), &tls).is_err());
    }
}
