//! Patient record entity.
//!
//! A patient is an immutable-shape record: constructed once, stored in the
//! registry, never updated in place. Field validation lives in the
//! `clinic-types` newtypes, so a `Patient` that exists is a valid one, and
//! the same guarantees hold when a record is read back from the snapshot.

use chrono::NaiveDate;
use clinic_types::{EmailAddress, NationalId, NonEmptyText, PersonName};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Generated unique record id.
    pub id: Uuid,

    /// Given name, normalized casing.
    pub first_name: PersonName,

    /// Family name, normalized casing.
    pub last_name: PersonName,

    /// National identifier, the unique patient key.
    pub national_id: NationalId,

    /// Date of birth.
    pub birth_date: NaiveDate,

    /// Contact phone number, free-form.
    pub phone: NonEmptyText,

    /// Contact email address.
    pub email: EmailAddress,

    /// Free-text note, may be empty.
    #[serde(default)]
    pub note: String,
}

impl Patient {
    /// Creates a new patient record with a freshly generated id.
    ///
    /// Validation happens at the type level: the caller can only supply
    /// already-validated names, identifier, phone and email.
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        national_id: NationalId,
        birth_date: NaiveDate,
        phone: NonEmptyText,
        email: EmailAddress,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            national_id,
            birth_date,
            phone,
            email,
            note: note.into(),
        }
    }
}

impl std::fmt::Display for Patient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} (ID: {})",
            self.first_name, self.last_name, self.national_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Patient {
        Patient::new(
            PersonName::new("ada").unwrap(),
            PersonName::new("lovelace").unwrap(),
            NationalId::new("12345678901").unwrap(),
            NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
            NonEmptyText::new("0551 234 5678").unwrap(),
            EmailAddress::parse("ada@example.com").unwrap(),
            "",
        )
    }

    #[test]
    fn new_generates_distinct_ids() {
        let a = sample();
        let b = sample();
        assert_ne!(a.id, b.id, "each record should get its own id");
    }

    #[test]
    fn display_shows_name_and_national_id() {
        let patient = sample();
        assert_eq!(patient.to_string(), "Ada Lovelace (ID: 12345678901)");
    }

    #[test]
    fn serde_round_trip_preserves_the_record() {
        let patient = sample();
        let json = serde_json::to_string(&patient).expect("should serialize");
        let back: Patient = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back, patient);
    }

    #[test]
    fn missing_note_defaults_to_empty() {
        let patient = sample();
        let mut value = serde_json::to_value(&patient).expect("should serialize");
        value.as_object_mut().unwrap().remove("note");
        let back: Patient = serde_json::from_value(value).expect("should deserialize");
        assert_eq!(back.note, "");
    }
}
