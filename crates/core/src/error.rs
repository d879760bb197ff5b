use chrono::NaiveDateTime;
use clinic_types::{NationalId, PersonName};

#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("a patient with national id {0} is already registered")]
    DuplicatePatient(NationalId),
    #[error("no patient registered with national id {0}, register the patient first")]
    UnknownPatient(NationalId),
    #[error("{practitioner} already has an appointment at {scheduled_at}")]
    AppointmentConflict {
        practitioner: PersonName,
        scheduled_at: NaiveDateTime,
    },
    #[error("appointment fee must be a finite non-negative amount, got {0}")]
    InvalidFee(f64),
    #[error("failed to serialize clinic state: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize clinic state: {0}")]
    Deserialization(serde_json::Error),

    #[error("text validation failed: {0}")]
    Text(#[from] clinic_types::TextError),
    #[error("snapshot storage error: {0}")]
    Snapshot(#[from] clinic_files::SnapshotError),
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
