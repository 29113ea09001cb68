//! Resilient HTTP fetching
//!
//! One GET per attempt over a fresh connection, transient failures retried
//! on a fixed budget, content-type expectations enforced for HTML-only
//! requests.

mod client;
mod fetcher;

pub use client::{build_client, request_headers};
pub use fetcher::{FetchOutcome, FetchRequest, FetchResponse, Fetcher, RetryPolicy};
