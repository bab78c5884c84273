//! Transactional upsert/remove against the host configuration file.
//!
//! Each operation is one synchronous read-modify-write transaction: take
//! a `.backup` copy, mutate in memory, write atomically, drop the
//! backup. Any fault in between restores the backup via
//! [`BackupGuard`]'s drop path, so the document is never left corrupted.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use crate::backup::BackupGuard;
use crate::document::ConfigDocument;
use crate::document::ServerEntry;
use crate::error::MutateErr;
use crate::error::Result;

/// Spaces per indentation level when no width was requested.
pub const DEFAULT_INDENT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    Added,
    Updated,
    Unchanged,
    Removed,
    NotFound,
    NoRegistry,
    MissingFile,
}

impl fmt::Display for MutationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MutationStatus::Added => "added",
            MutationStatus::Updated => "updated",
            MutationStatus::Unchanged => "unchanged",
            MutationStatus::Removed => "removed",
            MutationStatus::NotFound => "not_found",
            MutationStatus::NoRegistry => "no_registry",
            MutationStatus::MissingFile => "missing_file",
        };
        f.write_str(s)
    }
}

/// What a transaction did, for the caller to print and turn into an
/// exit code. Failures are `Err(MutateErr)`, not a status.
#[derive(Debug)]
pub struct Outcome {
    pub status: MutationStatus,
    pub name: String,
    pub message: String,
}

impl Outcome {
    fn new(status: MutationStatus, name: &str, message: String) -> Self {
        Self {
            status,
            name: name.to_string(),
            message,
        }
    }
}

/// Presence probe: file existence only, no parsing, no side effects.
pub fn exists(document: &Path) -> bool {
    document.exists()
}

/// Inserts `entry` under `name`, or replaces the existing entry when it
/// differs. An equal entry is a no-op that leaves the file untouched.
/// Creates the document (and missing parent directories) on first run.
pub fn upsert(document: &Path, name: &str, entry: ServerEntry, indent: usize) -> Result<Outcome> {
    if name.is_empty() {
        return Err(MutateErr::EmptyName);
    }
    if entry.command.is_empty() {
        return Err(MutateErr::EmptyCommand);
    }

    if let Some(parent) = document.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    if !document.exists() {
        // First run: lay down a minimal document so the transaction
        // below always starts from a well-formed base.
        debug!("creating {} with an empty registry", document.display());
        write_atomic(document, &ConfigDocument::empty().to_bytes(indent)?)?;
    }

    let guard = BackupGuard::acquire(document)?;
    let outcome = apply_upsert(document, name, entry, indent)?;
    guard.commit()?;
    Ok(outcome)
}

fn apply_upsert(
    document: &Path,
    name: &str,
    candidate: ServerEntry,
    indent: usize,
) -> Result<Outcome> {
    let bytes = fs::read(document)?;
    let mut doc = ConfigDocument::parse(&bytes)?;

    let previous = doc.entry(name);
    if previous.as_ref() == Some(&candidate) {
        debug!("`{name}` unchanged; not rewriting {}", document.display());
        return Ok(Outcome::new(
            MutationStatus::Unchanged,
            name,
            format!("`{name}` is already registered with this command and args"),
        ));
    }

    let (status, message) = if doc.has_entry(name) {
        let message = match &previous {
            Some(prev) => format!("replaced `{name}`: {prev} -> {candidate}"),
            None => format!("replaced malformed entry `{name}` with {candidate}"),
        };
        (MutationStatus::Updated, message)
    } else {
        (
            MutationStatus::Added,
            format!("registered `{name}` ({candidate})"),
        )
    };

    doc.servers_mut()
        .insert(name.to_string(), serde_json::to_value(&candidate)?);
    write_atomic(document, &doc.to_bytes(indent)?)?;
    Ok(Outcome::new(status, name, message))
}

/// Deletes the entry under `name`. Missing file, missing/empty registry,
/// and unknown names are reported as statuses rather than errors; the
/// same backup/restore discipline as upsert protects the write.
pub fn remove(document: &Path, name: &str) -> Result<Outcome> {
    if name.is_empty() {
        return Err(MutateErr::EmptyName);
    }

    if !document.exists() {
        return Ok(Outcome::new(
            MutationStatus::MissingFile,
            name,
            format!(
                "no configuration file at {}; nothing to remove",
                document.display()
            ),
        ));
    }

    let guard = BackupGuard::acquire(document)?;
    let outcome = apply_remove(document, name)?;
    guard.commit()?;
    Ok(outcome)
}

fn apply_remove(document: &Path, name: &str) -> Result<Outcome> {
    let bytes = fs::read(document)?;
    let mut doc = ConfigDocument::parse(&bytes)?;

    match doc.servers() {
        None => {
            return Ok(Outcome::new(
                MutationStatus::NoRegistry,
                name,
                "the configuration file has no server registry".to_string(),
            ));
        }
        Some(servers) if servers.is_empty() => {
            return Ok(Outcome::new(
                MutationStatus::NoRegistry,
                name,
                "the server registry is empty".to_string(),
            ));
        }
        Some(servers) if !servers.contains_key(name) => {
            return Ok(Outcome::new(
                MutationStatus::NotFound,
                name,
                format!("`{name}` is not in the registry"),
            ));
        }
        Some(_) => {}
    }

    // shift_remove keeps the relative order of the remaining entries.
    doc.servers_mut().shift_remove(name);
    write_atomic(document, &doc.to_bytes(DEFAULT_INDENT)?)?;
    Ok(Outcome::new(
        MutationStatus::Removed,
        name,
        format!("removed `{name}` from the registry"),
    ))
}

/// Read-only enumeration of the registry for display. Entries that do
/// not deserialize are skipped with a warning; a missing file or
/// registry is just an empty list.
pub fn entries(document: &Path) -> Result<Vec<(String, ServerEntry)>> {
    if !document.exists() {
        return Ok(Vec::new());
    }
    let bytes = fs::read(document)?;
    let doc = ConfigDocument::parse(&bytes)?;

    let Some(servers) = doc.servers() else {
        return Ok(Vec::new());
    };

    let mut out = Vec::with_capacity(servers.len());
    for name in servers.keys() {
        match doc.entry(name) {
            Some(entry) => out.push((name.clone(), entry)),
            None => tracing::warn!("skipping malformed registry entry `{name}`"),
        }
    }
    Ok(out)
}

/// Writes via a temporary file in the same directory plus a rename, so a
/// torn write can never leave a half-written document behind.
fn write_atomic(document: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match document.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(document).map_err(|e| e.error)?;
    Ok(())
}
