//! Whole-document JSON persistence.
//!
//! Reads are tolerant: an absent, unreadable, or corrupt document yields the
//! type's default — corrupt state is regenerated, never fatal. Writes go to
//! a temp file in the target directory and are renamed into place, so
//! readers only ever observe complete documents.

use std::io::Write;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::error::{Result, StateError};

/// Load a document, falling back to `T::default()` when the file is absent
/// or does not parse.
pub fn load_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            warn!(path = %path.display(), "state document unreadable, using defaults: {e}");
            return T::default();
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            warn!(path = %path.display(), "state document corrupt, using defaults: {e}");
            T::default()
        }
    }
}

/// Serialise `value` and atomically replace the document at `path`.
///
/// The temp file lives in the same directory as the target so the final
/// rename stays on one filesystem.
pub fn save_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    serde_json::to_writer_pretty(&mut tmp, value)?;
    tmp.flush()?;
    tmp.persist(path)
        .map_err(|e| StateError::Replace(e.to_string()))?;
    Ok(())
}
