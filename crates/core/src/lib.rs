//! # Clinic Core
//!
//! Core business logic for the clinic registry.
//!
//! This crate contains pure data operations and flat-file persistence:
//! - Patient registration with national-id uniqueness
//! - Appointment booking with practitioner/time conflict detection
//! - Date-range listing and VAT-inclusive fee calculation
//! - Whole-state snapshots written atomically via `clinic_files`
//!
//! **No interface concerns**: console menus, windows, or service endpoints
//! do not belong here.

pub mod appointment;
pub mod config;
pub mod constants;
pub mod error;
pub mod fees;
pub mod patient;
pub mod service;

pub use appointment::Appointment;
pub use config::ClinicConfig;
pub use error::{ClinicError, ClinicResult};
pub use fees::fee_with_vat;
pub use patient::Patient;
pub use service::ClinicService;

// Re-export the validated text types so callers rarely need a direct
// clinic-types dependency.
pub use clinic_types::{EmailAddress, NationalId, NonEmptyText, PersonName, TextError};
