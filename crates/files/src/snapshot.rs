//! Snapshot store implementation
//!
//! This module provides the core implementation of the clinic's flat-file
//! persistence through the [`SnapshotStore`] type.
//!
//! # Storage Model
//!
//! One store manages one snapshot file. The whole registry state is
//! serialised by the caller and handed over as a string; the store only
//! guarantees how the bytes reach disk:
//!
//! - **Atomic replace**: content is written to a temporary file in the
//!   snapshot's directory and renamed into place. Readers see either the
//!   old snapshot or the new one, never a partial write.
//! - **Backups**: an explicit copy named `<UTC stamp>_<file name>` next
//!   to the snapshot, e.g. `20260314_101500_clinic.json`.
//!
//! # Implementation Notes
//!
//! - Path validation happens eagerly at construction time
//! - The parent directory is created when the store is constructed
//! - The store is stateless between calls; it holds only the path

use crate::SnapshotError;
use chrono::Utc;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Store for a single whole-state snapshot file
///
/// The `SnapshotStore` provides a safe interface for persisting the clinic
/// registry to one flat file with atomic write-then-rename semantics.
#[derive(Debug)]
pub struct SnapshotStore {
    /// Path of the snapshot file
    data_file: PathBuf,
}

impl SnapshotStore {
    /// Creates a new `SnapshotStore` for the given snapshot path
    ///
    /// The parent directory is created if it does not exist yet, so a
    /// first run against a fresh data directory works without setup.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` if:
    /// - The path names an existing directory
    /// - The path has no file name component
    /// - Creating the parent directory fails (I/O)
    pub fn new(data_file: &Path) -> Result<Self, SnapshotError> {
        if data_file.is_dir() {
            return Err(SnapshotError::InvalidDataFile(format!(
                "Path names a directory: {}",
                data_file.display()
            )));
        }

        if data_file.file_name().is_none() {
            return Err(SnapshotError::InvalidDataFile(format!(
                "Path has no file name: {}",
                data_file.display()
            )));
        }

        if let Some(parent) = data_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(Self {
            data_file: data_file.to_path_buf(),
        })
    }

    /// Returns the path of the snapshot file
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Returns true if a snapshot has been written
    #[must_use]
    pub fn exists(&self) -> bool {
        self.data_file.is_file()
    }

    /// Reads the current snapshot
    ///
    /// A missing file is a normal condition (nothing has been persisted
    /// yet) and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Io` for any read failure other than the
    /// file not existing.
    pub fn read(&self) -> Result<Option<String>, SnapshotError> {
        match fs::read_to_string(&self.data_file) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SnapshotError::Io(e)),
        }
    }

    /// Replaces the snapshot atomically
    ///
    /// The content is written to a temporary file in the snapshot's
    /// directory, flushed, and renamed over the snapshot path. The rename
    /// is what makes the replace atomic; the temporary file must live in
    /// the same directory so both are on one filesystem.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Io` if the temporary file cannot be
    /// created, written, or renamed into place.
    pub fn write(&self, contents: &str) -> Result<(), SnapshotError> {
        let dir = match self.data_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.data_file).map_err(|e| e.error)?;

        Ok(())
    }

    /// Copies the current snapshot to a timestamped sibling file
    ///
    /// The backup is named `<UTC stamp>_<file name>` and placed in the
    /// snapshot's directory. Returns the backup path, or `Ok(None)` when
    /// no snapshot exists yet.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Io` if the copy fails.
    pub fn backup(&self) -> Result<Option<PathBuf>, SnapshotError> {
        if !self.exists() {
            return Ok(None);
        }

        let file_name = self
            .data_file
            .file_name()
            .ok_or_else(|| {
                SnapshotError::InvalidDataFile(format!(
                    "Path has no file name: {}",
                    self.data_file.display()
                ))
            })?
            .to_string_lossy();

        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let backup_path = self
            .data_file
            .with_file_name(format!("{stamp}_{file_name}"));

        fs::copy(&self.data_file, &backup_path)?;
        Ok(Some(backup_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> SnapshotStore {
        SnapshotStore::new(&temp.path().join("clinic.json")).expect("store should construct")
    }

    #[test]
    fn test_new_creates_missing_parent_directories() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let nested = temp.path().join("data").join("clinic").join("clinic.json");

        let store = SnapshotStore::new(&nested).expect("store should construct");

        assert!(nested.parent().unwrap().is_dir(), "parent should be created");
        assert!(!store.exists(), "no snapshot should exist yet");
    }

    #[test]
    fn test_new_rejects_directory_path() {
        let temp = TempDir::new().expect("Failed to create temp dir");

        let err = SnapshotStore::new(temp.path()).expect_err("directory path should be rejected");

        assert!(matches!(err, SnapshotError::InvalidDataFile(_)));
    }

    #[test]
    fn test_read_missing_snapshot_is_none() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let store = store_in(&temp);

        let contents = store.read().expect("read should succeed");

        assert!(contents.is_none(), "missing snapshot should read as None");
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let store = store_in(&temp);

        store.write("{\"patients\":{}}").expect("write should succeed");

        let contents = store.read().expect("read should succeed");
        assert_eq!(contents.as_deref(), Some("{\"patients\":{}}"));
    }

    #[test]
    fn test_write_replaces_previous_snapshot() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let store = store_in(&temp);

        store.write("first").expect("first write should succeed");
        store.write("second").expect("second write should succeed");

        let contents = store.read().expect("read should succeed");
        assert_eq!(contents.as_deref(), Some("second"));
    }

    #[test]
    fn test_write_leaves_no_temporary_files_behind() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let store = store_in(&temp);

        store.write("state").expect("write should succeed");

        let entries: Vec<_> = fs::read_dir(temp.path())
            .expect("should list temp dir")
            .flatten()
            .collect();
        assert_eq!(entries.len(), 1, "only the snapshot should remain");
        assert_eq!(entries[0].file_name(), "clinic.json");
    }

    #[test]
    fn test_backup_without_snapshot_is_none() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let store = store_in(&temp);

        let backup = store.backup().expect("backup should succeed");

        assert!(backup.is_none(), "nothing to back up yet");
    }

    #[test]
    fn test_backup_copies_snapshot_to_stamped_sibling() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let store = store_in(&temp);
        store.write("snapshot body").expect("write should succeed");

        let backup_path = store
            .backup()
            .expect("backup should succeed")
            .expect("backup path should be returned");

        assert_ne!(backup_path, store.data_file());
        assert_eq!(backup_path.parent(), store.data_file().parent());

        let name = backup_path.file_name().unwrap().to_string_lossy();
        assert!(
            name.ends_with("_clinic.json"),
            "backup name should end with the snapshot name, got {name}"
        );

        let copied = fs::read_to_string(&backup_path).expect("should read backup");
        assert_eq!(copied, "snapshot body");

        let original = store.read().expect("read should succeed");
        assert_eq!(original.as_deref(), Some("snapshot body"), "original intact");
    }
}
