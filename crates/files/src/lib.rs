//! Clinic snapshot storage
//!
//! This crate provides whole-file persistence for the clinic registry.
//!
//! ## Design Principles
//!
//! - The registry state is persisted as a single snapshot file, rewritten
//!   in full on every mutation
//! - Writes are atomic: content goes to a temporary file in the same
//!   directory and is renamed over the snapshot, so a crash mid-write
//!   never corrupts the previous state
//! - A missing snapshot is a normal condition (first run), not an error
//! - Backups are explicit, timestamped copies placed next to the snapshot
//!
//! This crate is format-agnostic: it stores and returns strings. The
//! registry decides what goes into the snapshot.
//!
//! ## Example Usage
//!
//! ```no_run
//! use clinic_files::SnapshotStore;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SnapshotStore::new(Path::new("clinic_data/clinic.json"))?;
//! store.write("{}")?;
//! # Ok(())
//! # }
//! ```

mod snapshot;

pub use snapshot::SnapshotStore;

/// Errors that can occur during snapshot operations
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot path is unusable (names a directory, or has no file name)
    #[error("Invalid data file path: {0}")]
    InvalidDataFile(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
