//! Artifact persistence.
//!
//! Decodes a base64 image payload and writes it to disk. Only the size
//! estimate leaves this module; the bytes do not.

use base64::Engine;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Outcome of a persistence request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted {
    /// Payload decoded and written.
    Saved { path: PathBuf, size_kb: u64 },
    /// No payload or no destination; nothing written.
    Skipped,
}

impl Persisted {
    pub const fn saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Errors while persisting an artifact.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Invalid base64 image data: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Estimated decoded size in KB for a base64 string of `base64_len` bytes.
///
/// `round(len * 0.75 / 1024)`, computed in integers.
pub const fn estimate_size_kb(base64_len: usize) -> u64 {
    (base64_len as u64 * 3 + 2048) / 4096
}

/// Decode `data` and write it to `destination`.
///
/// Skips without error when either is missing. The file is overwritten if
/// it exists; the parent directory must already exist.
pub async fn persist(
    data: Option<&str>,
    destination: Option<&Path>,
) -> Result<Persisted, PersistenceError> {
    let (Some(data), Some(path)) = (data, destination) else {
        return Ok(Persisted::Skipped);
    };

    let bytes = base64::engine::general_purpose::STANDARD.decode(data.trim())?;

    tokio::fs::write(path, &bytes)
        .await
        .map_err(|source| PersistenceError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Artifact saved");

    Ok(Persisted::Saved {
        path: path.to_path_buf(),
        size_kb: estimate_size_kb(data.len()),
    })
}
