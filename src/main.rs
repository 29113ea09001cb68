//! Pith main entry point
//!
//! Command-line interface for the Pith content extractor.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use pith::config::{parse_media_kinds, CrawlOptions, TextMode, TlsOptions};
use pith::crawl::Crawler;

/// Pith: a web page content extractor
///
/// Pith fetches a page, isolates its main content, and saves the extracted
/// text and media. With --crawl it follows same-domain links breadth-first
/// and extracts every reachable page.
#[derive(Parser, Debug)]
#[command(name = "pith")]
#[command(version)]
#[command(about = "Extract main text and media from web pages", long_about = None)]
struct Cli {
    /// URL of the web page to extract content from
    url: String,

    /// Directory path to save extracted content
    save_path: PathBuf,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Disable TLS certificate verification (for self-signed certificates)
    #[arg(long)]
    no_verify_ssl: bool,

    /// Path to a PEM certificate bundle for a custom CA
    #[arg(long, value_name = "PATH")]
    ssl_cert: Option<PathBuf>,

    /// Comma-separated media types to extract: images, videos, audio
    #[arg(long, default_value = "images,videos,audio")]
    media_types: String,

    /// Extract only text content, skip all media downloads
    #[arg(long)]
    text_only: bool,

    /// Strip all HTML tags and extract plain text (enabled by default)
    #[arg(long, default_value_t = true)]
    strip_html: bool,

    /// Preserve basic document structure (headings, paragraphs) in output
    #[arg(long)]
    preserve_structure: bool,

    /// Crawl and extract content from all same-domain linked pages
    #[arg(long)]
    crawl: bool,

    /// Maximum number of pages to crawl (default: unlimited)
    #[arg(long, value_name = "N")]
    crawl_limit: Option<usize>,

    /// Drop paragraphs scoring below this quality threshold (0-1)
    #[arg(long, value_name = "SCORE")]
    quality_threshold: Option<f64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let seed = Url::parse(&cli.url)?;
    if seed.scheme() != "http" && seed.scheme() != "https" {
        anyhow::bail!("unsupported URL scheme: {}", seed.scheme());
    }

    let tls = match &cli.ssl_cert {
        Some(path) => {
            tracing::info!("using certificate bundle {}", path.display());
            TlsOptions::with_cert_bundle(path)?
        }
        None => {
            if cli.no_verify_ssl {
                tracing::warn!("TLS certificate verification disabled");
            }
            TlsOptions {
                no_verify: cli.no_verify_ssl,
                cert_pem: None,
            }
        }
    };

    let media_kinds = if cli.text_only {
        tracing::info!("text-only mode: media downloads disabled");
        Vec::new()
    } else {
        parse_media_kinds(&cli.media_types)?
    };

    let options = CrawlOptions {
        save_path: cli.save_path,
        timeout: Duration::from_secs(cli.timeout),
        tls,
        media_kinds,
        text_mode: if cli.strip_html && cli.preserve_structure {
            TextMode::Structured
        } else {
            TextMode::Plain
        },
        crawl: cli.crawl,
        crawl_limit: cli.crawl_limit,
        quality_threshold: cli.quality_threshold,
    };

    tracing::info!("extracting {seed}");
    let summary = Crawler::new(options).run(seed).await?;

    tracing::info!(
        "done: {} pages visited, {} documents written, {} media stored, {} pages skipped",
        summary.pages_visited,
        summary.documents_written,
        summary.media_stored,
        summary.pages_skipped
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pith=info,warn"),
            1 => EnvFilter::new("pith=debug,info"),
            2 => EnvFilter::new("pith=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
