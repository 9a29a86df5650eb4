//! services/dashboard/src/adapters/file_store.rs
//!
//! This module contains the file-backed storage adapter, the concrete implementation
//! of the `KeyValueStore` port from the `core` crate. Each key is one JSON file in
//! the data directory.

use learning_dashboard_core::ports::{KeyValueStore, PortError, PortResult};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A storage adapter that keeps `<data_dir>/<key>.json` per key.
#[derive(Clone, Debug)]
pub struct FileStoreAdapter {
    data_dir: PathBuf,
}

impl FileStoreAdapter {
    /// Creates a new `FileStoreAdapter`. The directory is created on first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: &str) -> PortResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PortError::Storage(format!("invalid storage key '{}'", key)));
        }
        Ok(self.data_dir.join(format!("{}.json", key)))
    }
}

/// Writes `value` and flushes it to disk before returning.
fn write_synced(path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> PortError {
    PortError::Storage(format!("failed to {} {}: {}", action, path.display(), e))
}

//=========================================================================================
// `KeyValueStore` Trait Implementation
//=========================================================================================

impl KeyValueStore for FileStoreAdapter {
    fn get(&self, key: &str) -> PortResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read", &path, e)),
        }
    }

    /// Writes to a sibling temp file and renames it over the target, so readers
    /// never observe a half-written snapshot.
    fn put(&self, key: &str, value: &str) -> PortResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| io_error("create", &self.data_dir, e))?;

        let tmp = path.with_extension("json.tmp");
        if let Err(e) = write_synced(&tmp, value) {
            let _ = fs::remove_file(&tmp);
            return Err(io_error("write", &tmp, e));
        }
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(io_error("replace", &path, e));
        }
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> PortResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("remove", &path, e)),
        }
    }
}
