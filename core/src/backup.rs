//! Scoped backup of the configuration document.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::warn;

use crate::paths::backup_path;

/// Copies the document aside on acquisition and restores it on drop
/// unless [`BackupGuard::commit`] ran first.
///
/// Running the restore from `Drop` means it fires on early `?` returns
/// and on panics alike, which is what the installer needs: however a
/// transaction dies, the document is put back the way it was found.
#[derive(Debug)]
pub struct BackupGuard {
    document: PathBuf,
    backup: Option<PathBuf>,
    committed: bool,
}

impl BackupGuard {
    /// Takes a `.backup` copy of `document` if it exists. When the
    /// document is missing the guard is armed with nothing to restore.
    pub fn acquire(document: &Path) -> std::io::Result<Self> {
        let backup = if document.exists() {
            let path = backup_path(document);
            fs::copy(document, &path)?;
            debug!(
                "backed up {} -> {}",
                document.display(),
                path.display()
            );
            Some(path)
        } else {
            None
        };
        Ok(Self {
            document: document.to_path_buf(),
            backup,
            committed: false,
        })
    }

    /// The transaction succeeded: discard the backup instead of
    /// restoring it.
    pub fn commit(mut self) -> std::io::Result<()> {
        self.committed = true;
        if let Some(path) = self.backup.take() {
            fs::remove_file(&path)?;
            debug!("removed backup {}", path.display());
        }
        Ok(())
    }
}

impl Drop for BackupGuard {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        let Some(path) = self.backup.take() else {
            return;
        };
        // Copy back rather than rename so a failed restore still leaves
        // the backup on disk for manual recovery.
        if let Err(e) = fs::copy(&path, &self.document) {
            warn!(
                "failed to restore {} from {}: {e}",
                self.document.display(),
                path.display()
            );
            return;
        }
        warn!(
            "restored {} from backup after a failed transaction",
            self.document.display()
        );
        if let Err(e) = fs::remove_file(&path) {
            warn!("failed to remove backup {}: {e}", path.display());
        }
    }
}
