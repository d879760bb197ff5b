//! Clinic registry service.
//!
//! This module provides the manager that owns the in-memory collections,
//! enforces the registry invariants, and persists the full state to a
//! snapshot file on every mutation. It handles:
//!
//! - Patient registration with national-id uniqueness
//! - Appointment booking with practitioner/time conflict detection
//! - Date-range listing of appointments
//! - Whole-state persistence via [`SnapshotStore`]
//!
//! ## Snapshot Layout
//!
//! The registry is persisted as one pretty-printed JSON object:
//!
//! ```text
//! {
//!   "patients": { "<national id>": { ... }, ... },
//!   "appointments": [ { ... }, ... ]
//! }
//! ```
//!
//! Patients are keyed by national id; appointments keep insertion order.
//!
//! ## Pure Data Operations
//!
//! This module contains **only** data operations. Interface concerns
//! (console menus, windows, servers) live outside this workspace.

use crate::appointment::Appointment;
use crate::config::ClinicConfig;
use crate::error::{ClinicError, ClinicResult};
use crate::fees;
use crate::patient::Patient;
use chrono::NaiveDateTime;
use clinic_files::SnapshotStore;
use clinic_types::NationalId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Owned snapshot state, as read from the data file.
///
/// Top-level keys default to empty so an older or hand-trimmed file still
/// loads.
#[derive(Default, Deserialize)]
struct ClinicSnapshot {
    #[serde(default)]
    patients: BTreeMap<NationalId, Patient>,
    #[serde(default)]
    appointments: Vec<Appointment>,
}

/// Borrowed view of the registry state, for writing the snapshot without
/// cloning the collections.
#[derive(Serialize)]
struct ClinicSnapshotRef<'a> {
    patients: &'a BTreeMap<NationalId, Patient>,
    appointments: &'a [Appointment],
}

/// Service for managing the clinic registry.
///
/// The service owns the patient map (keyed by national id) and the
/// appointment list, and is the only writer of the snapshot file. All
/// mutating operations validate first, then update memory, then persist
/// the full state.
///
/// Single-threaded: mutations take `&mut self`, with no interior
/// mutability and no locking.
#[derive(Debug)]
pub struct ClinicService {
    cfg: Arc<ClinicConfig>,
    store: SnapshotStore,
    patients: BTreeMap<NationalId, Patient>,
    appointments: Vec<Appointment>,
}

impl ClinicService {
    /// Opens the registry, loading existing state from the data file.
    ///
    /// A missing data file is a first run and yields an empty registry;
    /// an unreadable or malformed file is an error, never silent data
    /// loss.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError` if:
    /// - The snapshot path is unusable or the parent directory cannot be
    ///   created
    /// - The data file exists but cannot be read (I/O)
    /// - The data file exists but does not parse as a clinic snapshot
    pub fn open(cfg: Arc<ClinicConfig>) -> ClinicResult<Self> {
        let store = SnapshotStore::new(cfg.data_file())?;

        let snapshot = match store.read()? {
            Some(contents) => {
                serde_json::from_str::<ClinicSnapshot>(&contents)
                    .map_err(ClinicError::Deserialization)?
            }
            None => {
                tracing::debug!(
                    data_file = %cfg.data_file().display(),
                    "no snapshot found, starting with an empty registry"
                );
                ClinicSnapshot::default()
            }
        };

        Ok(Self {
            cfg,
            store,
            patients: snapshot.patients,
            appointments: snapshot.appointments,
        })
    }

    /// Registers a new patient and persists the registry.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::DuplicatePatient` if a patient with the same
    /// national id is already registered, or a persistence error if the
    /// snapshot cannot be written.
    pub fn add_patient(&mut self, patient: Patient) -> ClinicResult<()> {
        if self.patients.contains_key(&patient.national_id) {
            return Err(ClinicError::DuplicatePatient(patient.national_id.clone()));
        }

        tracing::info!(national_id = %patient.national_id, "registering patient");
        self.patients.insert(patient.national_id.clone(), patient);
        self.persist()
    }

    /// Books an appointment and persists the registry.
    ///
    /// Validation order follows the registry invariants: the referenced
    /// patient must exist, and no existing appointment may have the same
    /// practitioner at the same exact date-time.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::UnknownPatient` if the referenced patient is
    /// not registered, `ClinicError::AppointmentConflict` on a
    /// practitioner/time clash, or a persistence error if the snapshot
    /// cannot be written.
    pub fn add_appointment(&mut self, appointment: Appointment) -> ClinicResult<()> {
        if !self.patients.contains_key(&appointment.patient_national_id) {
            return Err(ClinicError::UnknownPatient(
                appointment.patient_national_id.clone(),
            ));
        }

        let conflict = self.appointments.iter().any(|existing| {
            existing.practitioner == appointment.practitioner
                && existing.scheduled_at == appointment.scheduled_at
        });
        if conflict {
            tracing::warn!(
                practitioner = %appointment.practitioner,
                scheduled_at = %appointment.scheduled_at,
                "appointment conflict detected"
            );
            return Err(ClinicError::AppointmentConflict {
                practitioner: appointment.practitioner.clone(),
                scheduled_at: appointment.scheduled_at,
            });
        }

        tracing::info!(
            appointment_id = %appointment.id,
            practitioner = %appointment.practitioner,
            "booking appointment"
        );
        self.appointments.push(appointment);
        self.persist()
    }

    /// Lists appointments within the given inclusive bounds, sorted
    /// ascending by date-time.
    ///
    /// `None` bounds are open: `list_appointments(None, None)` returns
    /// every appointment. The sort is stable, so appointments at the same
    /// time keep their booking order.
    pub fn list_appointments(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Vec<Appointment> {
        let mut matching: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|a| {
                start.map_or(true, |s| a.scheduled_at >= s)
                    && end.map_or(true, |e| a.scheduled_at <= e)
            })
            .cloned()
            .collect();

        matching.sort_by_key(|a| a.scheduled_at);
        matching
    }

    /// Returns the registered patient with the given national id, if any.
    pub fn patient(&self, national_id: &NationalId) -> Option<&Patient> {
        self.patients.get(national_id)
    }

    /// Iterates over all registered patients, ordered by national id.
    pub fn patients(&self) -> impl Iterator<Item = &Patient> {
        self.patients.values()
    }

    /// Returns all appointments in booking order.
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Returns the VAT-inclusive total for a net fee at the configured
    /// rate.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::InvalidFee` if the fee is negative or not
    /// finite.
    pub fn fee_with_vat(&self, fee: f64) -> ClinicResult<f64> {
        fees::fee_with_vat(fee, self.cfg.vat_rate())
    }

    /// Copies the current snapshot to a timestamped backup file.
    ///
    /// Returns the backup path, or `Ok(None)` when nothing has been
    /// persisted yet.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the copy fails.
    pub fn backup(&self) -> ClinicResult<Option<PathBuf>> {
        let backup_path = self.store.backup()?;
        if let Some(path) = &backup_path {
            tracing::info!(backup = %path.display(), "snapshot backed up");
        }
        Ok(backup_path)
    }

    /// Writes the full registry state to the snapshot file.
    fn persist(&self) -> ClinicResult<()> {
        let snapshot = ClinicSnapshotRef {
            patients: &self.patients,
            appointments: &self.appointments,
        };
        let json =
            serde_json::to_string_pretty(&snapshot).map_err(ClinicError::Serialization)?;
        self.store.write(&json)?;

        tracing::debug!(
            patients = self.patients.len(),
            appointments = self.appointments.len(),
            "snapshot persisted"
        );
        Ok(())
    }
}
