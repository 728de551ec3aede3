use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use log::{debug, info};

use crate::world::errors::WorldError;
use crate::world::state::canonical_world_document;
use crate::world::types::{WorldDocument, WORLD_SCHEMA_VERSION};

/// Helper builder so tests can easily create throwaway stores with custom paths.
pub struct WorldStoreBuilder {
    path: PathBuf,
    seed_world: bool,
}

impl WorldStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            seed_world: true,
        }
    }

    /// Opt out of seeding the canonical starter world when the document file
    /// does not exist yet (useful for targeted tests).
    pub fn without_seed(mut self) -> Self {
        self.seed_world = false;
        self
    }

    pub fn open(self) -> Result<WorldStore, WorldError> {
        WorldStore::open_with_options(self.path, self.seed_world)
    }
}

/// Whole-document persistence for the world snapshot.
///
/// The document is one JSON file; every save rewrites it in full behind an
/// exclusive OS file lock, so persistence is last-writer-wins at the
/// transaction boundary and partial documents are never observable.
pub struct WorldStore {
    path: PathBuf,
}

impl WorldStore {
    /// Open the store rooted at `path`, seeding the canonical starter world
    /// if the document does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, WorldError> {
        Self::open_with_options(path.as_ref().to_path_buf(), true)
    }

    fn open_with_options(path: PathBuf, seed_world: bool) -> Result<Self, WorldError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let store = Self { path };
        if !store.path.exists() {
            let doc = if seed_world {
                info!("seeding starter world at {}", store.path.display());
                canonical_world_document()
            } else {
                WorldDocument::empty()
            };
            store.save(&doc)?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the persisted document.
    pub fn load(&self) -> Result<WorldDocument, WorldError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(WorldDocument::empty());
            }
            Err(e) => return Err(e.into()),
        };
        // Guard against any accidental leading NULs
        let doc: WorldDocument = serde_json::from_str(raw.trim_start_matches('\0'))?;
        if doc.schema_version != WORLD_SCHEMA_VERSION {
            return Err(WorldError::SchemaMismatch {
                expected: WORLD_SCHEMA_VERSION,
                found: doc.schema_version,
            });
        }
        Ok(doc)
    }

    /// Replace the persisted document with `doc`.
    ///
    /// Takes an exclusive lock on the destination, writes the new contents to
    /// a temp file in the same directory, fsyncs, and renames it into place,
    /// so a crashed or concurrent writer can never leave a half-written
    /// document behind.
    pub fn save(&self, doc: &WorldDocument) -> Result<(), WorldError> {
        let content = serde_json::to_string_pretty(doc)?;

        let lock_file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&self.path)?;
        lock_file.lock_exclusive()?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let base = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("world.json");
        let mut counter = 0u32;
        let tmp_path = loop {
            let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
            match OpenOptions::new().write(true).create_new(true).open(&candidate) {
                Ok(mut tmp) => {
                    tmp.write_all(content.as_bytes())?;
                    tmp.flush()?;
                    let _ = tmp.sync_all();
                    break candidate;
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    counter = counter.saturating_add(1);
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        };

        std::fs::rename(&tmp_path, &self.path)?;
        // Fsync the directory to persist the rename (best-effort)
        if let Ok(dir_file) = File::open(dir) {
            let _ = dir_file.sync_all();
        }
        drop(lock_file);

        debug!("world document persisted to {}", self.path.display());
        Ok(())
    }
}
