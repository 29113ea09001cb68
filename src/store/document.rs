//! Document persistence
//!
//! Extracted text is written under a content-addressed filename so that
//! identical content maps to the same file and re-crawls overwrite rather
//! than duplicate.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Content-addressed filename for extracted text:
/// `content_<first 32 hex chars of sha256(text)>.txt`.
pub fn content_filename(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    format!("content_{}.txt", &hex::encode(digest)[..32])
}

/// Writes extracted text to `dir`, creating the directory if needed.
/// Returns the path of the written file.
pub fn save_document(dir: &Path, text: &str) -> crate::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(content_filename(text));
    std::fs::write(&path, text)?;
    tracing::info!("saved document to {}", path.display());
    Ok(path)
}
