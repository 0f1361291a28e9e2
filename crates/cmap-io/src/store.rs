//! Storage providers.
//!
//! Parsers and the exporter never touch the file system directly; they go
//! through a [`Store`] passed in by the caller. This replaces any notion
//! of a process-wide colormap directory.

use crate::{FormatError, FormatResult};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// A provider of named byte payloads.
///
/// `load` returns `ErrorKind::NotFound` for unknown identifiers; the
/// codecs translate that into [`FormatError::SourceNotFound`].
pub trait Store {
    /// Loads the payload stored under `id`.
    fn load(&self, id: &str) -> io::Result<Vec<u8>>;

    /// Stores `bytes` under `id`, replacing any previous payload.
    fn save(&self, id: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Loads from a store, mapping not-found onto the typed failure.
pub(crate) fn load_source(store: &dyn Store, id: &str) -> FormatResult<Vec<u8>> {
    store.load(id).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            FormatError::SourceNotFound(id.to_string())
        } else {
            FormatError::Io(e)
        }
    })
}

/// A directory-backed store; identifiers are paths relative to the root.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Creates a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl Store for DirStore {
    fn load(&self, id: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.root.join(id))
    }

    fn save(&self, id: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.root.join(id);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)
    }
}

/// An in-memory store, mainly for tests and round-trip checks.
#[derive(Debug, Default)]
pub struct MemStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates an entry.
    pub fn insert(&self, id: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.lock().unwrap().insert(id.into(), bytes.into());
    }
}

impl Store for MemStore {
    fn load(&self, id: &str) -> io::Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, id.to_string()))
    }

    fn save(&self, id: &str, bytes: &[u8]) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(id.to_string(), bytes.to_vec());
        Ok(())
    }
}
