use std::{
    fs, io,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, RwLock,
    },
};

use anyhow::{anyhow, bail, Context, Result};

use super::Snapshot;
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

/// Where a snapshot lives between runs.
pub trait SnapshotBackend: Send + Sync {
    /// `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Snapshot>>;
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Pretty-printed JSON file.
///
/// A file that cannot be parsed is moved aside to `<name>.bak` before the
/// error is returned. If the file cannot be read or moved, saving is refused
/// from then on so the unreadable file is never overwritten.
pub struct JsonFileBackend {
    path: PathBuf,
    read_only: AtomicBool,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            read_only: AtomicBool::new(false),
        }
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".bak");
        self.path.with_file_name(name)
    }

    fn refuse_saves(&self) {
        self.read_only.store(true, Ordering::SeqCst);
    }
}

impl SnapshotBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<Snapshot>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                self.refuse_saves();
                return Err(anyhow::Error::new(err).context(format!(
                    "Failed to read snapshot from {}; saving is disabled",
                    self.path.display()
                )));
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                let backup = self.backup_path();
                if let Err(rename_err) = fs::rename(&self.path, &backup) {
                    self.refuse_saves();
                    return Err(anyhow::Error::new(rename_err).context(format!(
                        "Failed to move unreadable snapshot {} to {}; saving is disabled",
                        self.path.display(),
                        backup.display()
                    )));
                }
                Err(anyhow::Error::new(err).context(format!(
                    "Failed to parse snapshot {} (moved to {})",
                    self.path.display(),
                    backup.display()
                )))
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if self.read_only.load(Ordering::SeqCst) {
            bail!(
                "Refusing to overwrite unreadable snapshot {}; move it away and retry",
                self.path.display()
            );
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create snapshot directory {}", parent.display())
            })?;
        }
        let serialized = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write snapshot to {}", self.path.display()))
    }
}

/// Process-local storage, used where nothing should touch the disk.
#[derive(Default)]
pub struct MemoryBackend {
    stored: Mutex<Option<Snapshot>>,
}

impl MemoryBackend {
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            stored: Mutex::new(Some(snapshot)),
        }
    }
}

impl SnapshotBackend for MemoryBackend {
    fn load(&self) -> Result<Option<Snapshot>> {
        let guard = self
            .stored
            .lock()
            .map_err(|_| anyhow!("memory snapshot lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let mut guard = self
            .stored
            .lock()
            .map_err(|_| anyhow!("memory snapshot lock poisoned"))?;
        *guard = Some(snapshot.clone());
        Ok(())
    }
}

/// In-memory snapshot backed by a [`SnapshotBackend`]. Every update persists
/// the whole snapshot while holding the write lock.
pub struct SnapshotStore {
    backend: Box<dyn SnapshotBackend>,
    data: RwLock<Snapshot>,
}

impl SnapshotStore {
    /// Load from `backend`, falling back to the built-in defaults when nothing
    /// is stored or the stored snapshot cannot be read.
    pub fn open(backend: Box<dyn SnapshotBackend>) -> Self {
        let data = match backend.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                log_info!("No stored snapshot; starting from defaults");
                Snapshot::default()
            }
            Err(err) => {
                log_warn!("{err:#}; starting from defaults");
                Snapshot::default()
            }
        };

        Self {
            backend,
            data: RwLock::new(data),
        }
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        let guard = self
            .data
            .read()
            .map_err(|_| anyhow!("snapshot lock poisoned"))?;
        Ok(guard.clone())
    }

    /// Run `mutate` against a working copy; on success the copy replaces the
    /// current snapshot and is persisted. A failed mutation changes nothing.
    pub fn update<T, F>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut Snapshot) -> Result<T>,
    {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("snapshot lock poisoned"))?;

        let mut working = guard.clone();
        let value = mutate(&mut working)?;
        self.backend.save(&working)?;
        *guard = working;
        Ok(value)
    }

    pub fn replace(&self, snapshot: Snapshot) -> Result<()> {
        self.update(|current| {
            *current = snapshot;
            Ok(())
        })
    }
}
