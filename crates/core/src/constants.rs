//! Constants used throughout the clinic core crate.
//!
//! This module contains the default file name and rate constants to ensure
//! consistency across the codebase and make maintenance easier.

/// Default file name for the persisted clinic snapshot.
pub const DEFAULT_DATA_FILE_NAME: &str = "clinic.json";

/// Default VAT rate applied to procedure fees.
pub const DEFAULT_VAT_RATE: f64 = 0.20;
