//! Durable storage for the queue document (JSON, atomic save).

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FerryError;

use super::document::QueueDocument;

/// Loads and saves the queue document. `save` is the only way the document
/// changes on disk; higher-level operations are load→transform→save
/// sequences run under the gate.
#[derive(Debug, Clone)]
pub struct QueueStore {
    path: PathBuf,
}

impl QueueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing file means "not yet initialized" and
    /// yields an empty document; an unreadable or malformed file is
    /// `StoreUnavailable` since it implies external corruption.
    pub fn load(&self) -> Result<QueueDocument, FerryError> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(QueueDocument::default());
            }
            Err(e) => {
                return Err(FerryError::StoreUnavailable(format!(
                    "read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };
        serde_json::from_slice(&bytes).map_err(|e| {
            FerryError::StoreUnavailable(format!("parse {}: {}", self.path.display(), e))
        })
    }

    /// Atomically replace the document: serialize into a temp file in the
    /// same directory, then rename over the real path. A concurrent reader
    /// sees either the old document or the new one, never a partial write.
    pub fn save(&self, doc: &QueueDocument) -> Result<()> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)
            .with_context(|| format!("create dir: {}", parent.display()))?;
        let mut tmp = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("temp file in {}", parent.display()))?;
        serde_json::to_writer_pretty(&mut tmp, doc).context("serialize queue document")?;
        tmp.persist(&self.path)
            .with_context(|| format!("replace {}", self.path.display()))?;
        Ok(())
    }
}
