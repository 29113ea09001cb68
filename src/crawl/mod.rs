//! Crawl controller
//!
//! Drives the fetch/extract/store pipeline over one page or, in crawl mode,
//! breadth-first over same-host links until the frontier drains or the page
//! limit is hit. Per-page failures (exhausted retries, wrong content-type,
//! error statuses) skip the page and keep the crawl alive; only option and
//! disk errors abort the run.

pub mod frontier;

use url::Url;

use crate::config::CrawlOptions;
use crate::extract::{extract_page, PageExtraction};
use crate::fetch::{FetchOutcome, FetchRequest, Fetcher, RetryPolicy};
use crate::quality::QualityScorer;
use crate::store::{save_document, MediaDownloader, MediaOutcome};
use crate::{PithError, Result};

use frontier::Frontier;

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub pages_visited: usize,
    pub documents_written: usize,
    pub media_stored: usize,
    pub pages_skipped: usize,
}

/// The crawl driver. One instance per run.
#[derive(Debug)]
pub struct Crawler {
    options: CrawlOptions,
    fetcher: Fetcher,
    scorer: Option<QualityScorer>,
}

impl Crawler {
    pub fn new(options: CrawlOptions) -> Self {
        let scorer = options.quality_threshold.map(QualityScorer::new);
        Self {
            options,
            fetcher: Fetcher::default(),
            scorer,
        }
    }

    /// Overrides the retry budget and delay for page and media fetches.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.fetcher = Fetcher::new(retry);
        self
    }

    /// Replaces the quality scorer, e.g. to attach a similarity model.
    pub fn with_scorer(mut self, scorer: QualityScorer) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Processes the seed page and, when crawling is enabled, every reachable
    /// same-host page up to the configured limit.
    pub async fn run(&self, seed: Url) -> Result<CrawlSummary> {
        let downloader = MediaDownloader::new(
            self.fetcher.clone(),
            self.options.timeout,
            self.options.tls.clone(),
        );
        let mut frontier = Frontier::seed(seed.clone());
        let mut summary = CrawlSummary::default();

        loop {
            if let Some(limit) = self.options.crawl_limit {
                if frontier.visited_count() >= limit {
                    tracing::info!("crawl limit of {limit} pages reached");
                    break;
                }
            }
            let Some(url) = frontier.pop() else {
                break;
            };
            if frontier.is_visited(&url) {
                continue;
            }
            frontier.mark_visited(&url);

            tracing::info!("processing {url}");
            match self
                .process_page(&url, &seed, &downloader, &mut frontier, &mut summary)
                .await
            {
                Ok(()) => {}
                Err(PithError::Transient {
                    url,
                    attempts,
                    source,
                }) => {
                    tracing::warn!("giving up on {url} after {attempts} attempts: {source}");
                    summary.pages_skipped += 1;
                }
                Err(e) => return Err(e),
            }

            if !self.options.crawl {
                break;
            }
        }

        summary.pages_visited = frontier.visited_count();
        Ok(summary)
    }

    /// Fetch, extract, persist, and enqueue outgoing links for one page.
    async fn process_page(
        &self,
        url: &Url,
        seed: &Url,
        downloader: &MediaDownloader,
        frontier: &mut Frontier,
        summary: &mut CrawlSummary,
    ) -> Result<()> {
        let request = FetchRequest::new(
            url.clone(),
            self.options.timeout,
            self.options.tls.clone(),
            true,
        );
        let response = match self.fetcher.fetch(&request).await? {
            FetchOutcome::Success(response) => response,
            FetchOutcome::ContentTypeMismatch { content_type } => {
                tracing::warn!("skipping {url}: content-type {content_type:?} is not a page");
                summary.pages_skipped += 1;
                return Ok(());
            }
        };

        if response.status != 200 {
            tracing::warn!(
                "skipping {url}: HTTP {} {}",
                response.status,
                response.reason
            );
            summary.pages_skipped += 1;
            return Ok(());
        }

        let body = String::from_utf8_lossy(&response.body);
        let extraction = extract_page(
            &body,
            url,
            &self.options.media_kinds,
            self.options.text_mode,
            self.options.crawl.then_some(seed),
        );

        for link in &extraction.links {
            frontier.enqueue(link.clone());
        }

        self.store_media(&extraction, downloader, summary).await;
        self.store_text(&extraction, summary)?;
        Ok(())
    }

    /// Downloads each media reference. Per-item failures are logged and do
    /// not stop the page or the crawl.
    async fn store_media(
        &self,
        extraction: &PageExtraction,
        downloader: &MediaDownloader,
        summary: &mut CrawlSummary,
    ) {
        for reference in &extraction.media {
            match downloader.store(reference, &self.options.save_path).await {
                Ok(MediaOutcome::Stored(_)) => summary.media_stored += 1,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("failed to store media {}: {e}", reference.url);
                }
            }
        }
    }

    fn store_text(&self, extraction: &PageExtraction, summary: &mut CrawlSummary) -> Result<()> {
        let text = match &self.scorer {
            Some(scorer) => scorer.filter_paragraphs(&extraction.text),
            None => extraction.text.clone(),
        };
        if text.is_empty() {
            tracing::info!("no content extracted");
            return Ok(());
        }
        save_document(&self.options.save_path, &text)?;
        summary.documents_written += 1;
        Ok(())
    }
}
