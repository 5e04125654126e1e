use std::{
    fmt::Debug,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use scribe_common::{AuthSnapshot, constants::AUTH_STORAGE_KEY};

use crate::errors::StorageError;

/// Backend that keeps the [`AuthSnapshot`] across restarts.
///
/// Implementations must be cheap and synchronous; snapshots are a few hundred bytes.
pub trait SnapshotStorage: Send + Sync + Debug {
    /// Read the last saved snapshot. `Ok(None)` if nothing was saved yet.
    fn load(&self) -> Result<Option<AuthSnapshot>, StorageError>;

    /// Replace the saved snapshot.
    fn save(&self, snapshot: &AuthSnapshot) -> Result<(), StorageError>;

    /// Forget the saved snapshot.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Keeps the snapshot in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<AuthSnapshot>>,
}

impl MemoryStorage {
    /// Start with a pre-seeded snapshot, as if saved by a previous run.
    pub fn with_snapshot(snapshot: AuthSnapshot) -> Self {
        Self {
            slot: Mutex::new(Some(snapshot)),
        }
    }
}

impl SnapshotStorage for MemoryStorage {
    fn load(&self) -> Result<Option<AuthSnapshot>, StorageError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, snapshot: &AuthSnapshot) -> Result<(), StorageError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Stores the snapshot as a JSON file.
///
/// The file holds bearer secrets. On Unix, permissions are set to `0o600`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Use an explicit file path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `<platform data dir>/scribe/auth-storage.json`.
    pub fn default_location() -> Result<Self, StorageError> {
        let dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
        Ok(Self::new(
            dir.join("scribe").join(format!("{AUTH_STORAGE_KEY}.json")),
        ))
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStorage for FileStorage {
    fn load(&self) -> Result<Option<AuthSnapshot>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, snapshot: &AuthSnapshot) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(snapshot)?;
        std::fs::write(&self.path, json)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        };
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
