//! URL resolution and normalization
//!
//! Two concerns live here:
//! - resolving references discovered in a page (media paths, hrefs) to
//!   absolute URLs relative to the page that contained them;
//! - normalizing URLs into the dedup key used by the crawl frontier.

use url::Url;

use crate::{UrlError, UrlResult};

/// Resolves a reference found on `base` to an absolute URL.
///
/// Resolution rule:
/// - an absolute `http(s)://` reference passes through unchanged;
/// - a root-relative path (`/...`) is combined with scheme + host;
/// - anything else is combined with the page's directory-equivalent path
///   (path up to and including the last `/`, without query or fragment).
///
/// The assembled string is re-parsed so dot segments normalize away.
pub fn resolve_reference(base: &Url, reference: &str) -> UrlResult<Url> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(UrlError::Malformed("empty reference".to_string()));
    }

    let lower = reference.to_ascii_lowercase();
    let assembled = if lower.starts_with("http://") || lower.starts_with("https://") {
        reference.to_string()
    } else if reference.starts_with('/') {
        format!("{}{}", root_url(base)?, reference)
    } else {
        format!("{}{}{}", root_url(base)?, directory_path(base), reference)
    };

    let resolved = Url::parse(&assembled).map_err(|e| UrlError::Parse(e.to_string()))?;
    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return Err(UrlError::InvalidScheme(resolved.scheme().to_string()));
    }
    Ok(resolved)
}

/// Normalizes a URL into the frontier dedup key: fragment stripped,
/// scheme + host + path + query retained.
pub fn normalize_for_dedup(url: &Url) -> String {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    normalized.to_string()
}

/// True when both URLs point at exactly the same host (and port).
pub fn same_host(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}

/// Scheme + host (+ non-default port) of a URL, without trailing slash.
fn root_url(url: &Url) -> UrlResult<String> {
    let host = url.host_str().ok_or(UrlError::MissingHost)?;
    match url.port() {
        Some(port) => Ok(format!("{}://{}:{}", url.scheme(), host, port)),
        None => Ok(format!("{}://{}", url.scheme(), host)),
    }
}

/// Path of the page up to and including the last `/`, query and fragment
/// excluded. `/a/b/page.html` becomes `/a/b/`, `/a/b/` stays as is.
fn directory_path(url: &Url) -> String {
    let path = url.path();
    match path.rfind('/') {
        Some(idx) => path[..=idx].to_string(),
        None => "/".to_string(),
    }
}
