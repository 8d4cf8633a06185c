use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::{PersistError, SnapshotStore};

/// Snapshot slot backed by a JSON file.
///
/// Writes go to a sibling temp file that is renamed over the target, so
/// readers never see a half-written file. Each write holds an exclusive
/// lock on `<path>.lock`.
///
/// A store opened with [`JsonFileStore::locked`] takes that lock up front
/// and keeps it until dropped. A process that loads, changes and saves
/// through such a store cannot lose another process's update in between.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    held: Option<File>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            held: None,
        }
    }

    /// Open the slot and hold its exclusive lock for the store's lifetime.
    /// Blocks while another process holds it.
    pub fn locked(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let mut store = Self::new(path);
        store.ensure_parent()?;
        store.held = Some(store.open_lock()?);
        tracing::debug!(path = %store.path.display(), "Holding state lock");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> PathBuf {
        self.sibling(".lock")
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    }

    fn write_error(&self, source: std::io::Error) -> PersistError {
        PersistError::WriteError {
            path: self.path.clone(),
            source,
        }
    }

    fn ensure_parent(&self) -> Result<(), PersistError> {
        match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => fs::create_dir_all(parent).map_err(|e| self.write_error(e)),
            None => Ok(()),
        }
    }

    fn open_lock(&self) -> Result<File, PersistError> {
        let lock_path = self.lock_path();
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| self.write_error(e))?;
        FileExt::lock_exclusive(&lock).map_err(|e| PersistError::LockError {
            path: lock_path,
            source: e,
        })?;
        Ok(lock)
    }

    fn replace_contents(&self, contents: &str) -> Result<(), PersistError> {
        let tmp_path = self.sibling(".tmp");
        File::create(&tmp_path)
            .and_then(|mut file| {
                file.write_all(contents.as_bytes())?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp_path, &self.path))
            .map_err(|e| {
                let _ = fs::remove_file(&tmp_path);
                self.write_error(e)
            })
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<String>, PersistError> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|e| PersistError::ReadError {
                path: self.path.clone(),
                source: e,
            })
    }

    fn save(&self, contents: &str) -> Result<(), PersistError> {
        self.ensure_parent()?;

        // Already exclusive when `held`; a second lock on the same file
        // from this process would block on itself.
        let lock = match self.held {
            Some(_) => None,
            None => Some(self.open_lock()?),
        };
        let result = self.replace_contents(contents);
        drop(lock);

        if result.is_ok() {
            tracing::debug!(path = %self.path.display(), bytes = contents.len(), "Saved state");
        }
        result
    }
}
