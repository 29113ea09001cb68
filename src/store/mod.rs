//! Persistence: extracted documents and downloaded media.

pub mod document;
pub mod media;

pub use document::{content_filename, save_document};
pub use media::{MediaDownloader, MediaOutcome};
