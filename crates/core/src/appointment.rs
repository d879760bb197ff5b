//! Appointment record entity.

use crate::fees::validate_fee;
use crate::ClinicResult;
use chrono::NaiveDateTime;
use clinic_types::{NationalId, NonEmptyText, PersonName};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A booked appointment.
///
/// Like [`Patient`](crate::Patient), an appointment is immutable in shape:
/// it is created once and only ever appended to the registry. The fee is
/// validated at construction and again on deserialization, so a negative
/// amount cannot enter through a hand-edited snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Generated unique record id.
    pub id: Uuid,

    /// National id of the patient this appointment belongs to. Must
    /// reference a registered patient; the registry enforces this.
    pub patient_national_id: NationalId,

    /// Date and time of the appointment, in the clinic's local time.
    /// No timezone is stored.
    pub scheduled_at: NaiveDateTime,

    /// Practitioner name, normalized casing. Conflict detection compares
    /// this normalized form.
    pub practitioner: PersonName,

    /// Description of the procedure.
    pub procedure: NonEmptyText,

    /// Net fee for the procedure, non-negative.
    #[serde(deserialize_with = "deserialize_fee")]
    pub fee: f64,
}

impl Appointment {
    /// Creates a new appointment record with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::InvalidFee` if the fee is negative or not
    /// finite.
    pub fn new(
        patient_national_id: NationalId,
        scheduled_at: NaiveDateTime,
        practitioner: PersonName,
        procedure: NonEmptyText,
        fee: f64,
    ) -> ClinicResult<Self> {
        validate_fee(fee)?;

        Ok(Self {
            id: Uuid::new_v4(),
            patient_national_id,
            scheduled_at,
            practitioner,
            procedure,
            fee,
        })
    }
}

fn deserialize_fee<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let fee = f64::deserialize(deserializer)?;
    validate_fee(fee).map_err(serde::de::Error::custom)?;
    Ok(fee)
}

impl std::fmt::Display for Appointment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} - {} - {}",
            self.scheduled_at, self.practitioner, self.patient_national_id, self.procedure
        )
    }
}
