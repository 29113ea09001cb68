//! Media downloader
//!
//! Downloads extracted media references into per-kind subdirectories under
//! the save path. A reference whose URL path carries no file extension is
//! skipped before any request is made. Missing files and HTTP errors are
//! per-item outcomes, never run-level failures.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::TlsOptions;
use crate::extract::MediaReference;
use crate::fetch::{FetchOutcome, FetchRequest, Fetcher};
use crate::Result;

/// Outcome of one media download attempt.
#[derive(Debug)]
pub enum MediaOutcome {
    /// The file was written to this path.
    Stored(PathBuf),
    /// The URL path has no file extension; no request was issued.
    SkippedNoExtension,
    /// The server answered 404.
    NotFound,
    /// The server answered with some other non-200 status.
    HttpError(u16),
}

/// Downloads media references discovered during extraction.
#[derive(Debug)]
pub struct MediaDownloader {
    fetcher: Fetcher,
    timeout: Duration,
    tls: TlsOptions,
}

impl MediaDownloader {
    pub fn new(fetcher: Fetcher, timeout: Duration, tls: TlsOptions) -> Self {
        Self {
            fetcher,
            timeout,
            tls,
        }
    }

    /// Downloads one reference into `root/<kind subdir>/<basename>`.
    ///
    /// Only transient network failures are retried (by the fetcher); a 404
    /// or any other error status resolves the item immediately.
    pub async fn store(&self, reference: &MediaReference, root: &Path) -> Result<MediaOutcome> {
        let Some(basename) = file_basename(&reference.url) else {
            tracing::debug!("skipping media without file extension: {}", reference.url);
            return Ok(MediaOutcome::SkippedNoExtension);
        };

        let request = FetchRequest::new(
            reference.url.clone(),
            self.timeout,
            self.tls.clone(),
            false,
        );
        let response = match self.fetcher.fetch(&request).await? {
            FetchOutcome::Success(response) => response,
            // html_only is false, so a mismatch cannot occur
            FetchOutcome::ContentTypeMismatch { .. } => unreachable!(),
        };

        match response.status {
            200 => {}
            404 => {
                tracing::warn!("media not found: {}", reference.url);
                return Ok(MediaOutcome::NotFound);
            }
            status => {
                tracing::warn!("media fetch failed with {status}: {}", reference.url);
                return Ok(MediaOutcome::HttpError(status));
            }
        }

        let dir = root.join(reference.kind.subdir());
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(basename);
        std::fs::write(&path, &response.body)?;
        tracing::info!("stored media at {}", path.display());
        Ok(MediaOutcome::Stored(path))
    }
}

/// Last path segment of the URL, but only when it carries a file extension.
fn file_basename(url: &url::Url) -> Option<String> {
    let segment = url.path_segments()?.last()?;
    if segment.is_empty() {
        return None;
    }
    Path::new(segment).extension()?;
    Some(segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn basename(url: &str) -> Option<String> {
        file_basename(&Url::parse(url).unwrap())
    }

    #[test]
    fn basename_requires_extension() {
        assert_eq!(basename("http://x.com/img/photo.jpg"), Some("photo.jpg".into()));
        assert_eq!(basename("http://x.com/img/photo"), None);
        assert_eq!(basename("http://x.com/img/"), None);
        assert_eq!(basename("http://x.com/"), None);
    }

    #[test]
    fn basename_ignores_query() {
        assert_eq!(
            basename("http://x.com/clip.mp4?token=abc"),
            Some("clip.mp4".into())
        );
    }
}
