//! Persisted credential: one opaque string in one file.
//!
//! Read at startup, written on change. Absence (or a blank file) means
//! offline mode — the gateway then answers with the deterministic mock.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File-backed store for the provider API key.
///
/// **Interaction**: the host reads the key at startup and feeds it to
/// `ChatGateway::set_api_key`; every change goes back through `save`.
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored key, trimmed. `None` when the file is absent, unreadable,
    /// or blank.
    pub fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Persists the key; an empty or whitespace-only key deletes the file so
    /// the next startup is offline.
    pub fn save(&self, key: &str) -> io::Result<()> {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e),
            }
        } else {
            fs::write(&self.path, trimmed)
        }
    }
}
