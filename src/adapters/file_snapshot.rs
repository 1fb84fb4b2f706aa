//! File snapshot adapter.
//!
//! Implements [`SnapshotPort`] over a plain text file: the only channel the
//! control panel and the monitor processes share.
//!
//! - A missing file reads as "no snapshot" rather than an error.
//! - Writes go to a temporary file in the same directory which is then
//!   renamed over the snapshot, so a reader polling the file sees either the
//!   old bank or the new one in full.
//! - An existing snapshot must itself be writable. A read-only file is
//!   reported as [`PersistError::PermissionDenied`] and left alone, and the
//!   replacement keeps the old file's permissions.
//! - No locking. Two writers race and the last rename wins.
//! - Parent directories are not created; a missing directory is reported as
//!   [`PersistError::PathNotFound`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};

use crate::app::ports::SnapshotPort;
use crate::error::PersistError;

/// Disambiguates temporary files of stores sharing one process.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Snapshot stored in a text file.
#[derive(Debug, Clone)]
pub struct FileSnapshot {
    path: PathBuf,
}

impl FileSnapshot {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "pins".into(), |n| n.to_string_lossy().into_owned());
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.path
            .with_file_name(format!(".{}.{}.{}.tmp", name, std::process::id(), seq))
    }

    /// Permissions of the current snapshot, `None` if there is none yet.
    ///
    /// Fails when the snapshot exists but this process may not write it.
    fn target_permissions(&self) -> Result<Option<fs::Permissions>, PersistError> {
        let file = match fs::OpenOptions::new().write(true).open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                debug!("FileSnapshot: {} not writable: {}", self.path.display(), e);
                return Err(PersistError::from_io(&e));
            }
        };
        let meta = file.metadata().map_err(|e| PersistError::from_io(&e))?;
        Ok(Some(meta.permissions()))
    }
}

impl SnapshotPort for FileSnapshot {
    fn load(&self) -> Result<Option<String>, PersistError> {
        match fs::read(&self.path) {
            // Undecodable bytes only spoil their own line.
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!("FileSnapshot: {} absent", self.path.display());
                Ok(None)
            }
            Err(e) => {
                debug!("FileSnapshot: read {} failed: {}", self.path.display(), e);
                Err(PersistError::from_io(&e))
            }
        }
    }

    fn store(&self, text: &str) -> Result<(), PersistError> {
        let permissions = self.target_permissions()?;

        let temp = self.temp_path();
        if let Err(e) = fs::write(&temp, text) {
            debug!("FileSnapshot: write {} failed: {}", temp.display(), e);
            return Err(PersistError::from_io(&e));
        }
        if let Some(perm) = permissions {
            if let Err(e) = fs::set_permissions(&temp, perm) {
                debug!("FileSnapshot: chmod {} failed: {}", temp.display(), e);
                let _ = fs::remove_file(&temp);
                return Err(PersistError::from_io(&e));
            }
        }
        if let Err(e) = fs::rename(&temp, &self.path) {
            debug!("FileSnapshot: rename onto {} failed: {}", self.path.display(), e);
            let _ = fs::remove_file(&temp);
            return Err(PersistError::from_io(&e));
        }
        trace!("FileSnapshot: wrote {} bytes to {}", text.len(), self.path.display());
        Ok(())
    }
}
