//! Validated text types for the clinic registry.
//!
//! Every type in this crate guarantees its invariant once constructed:
//! constructors trim and validate, and the serde implementations
//! re-validate on deserialization so a hand-edited data file cannot
//! smuggle malformed values back into the registry.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The national identifier contained characters outside the ASCII
    /// alphanumeric set
    #[error("National identifier must contain only ASCII letters and digits, got '{0}'")]
    InvalidNationalId(String),
    /// The email address failed structural validation
    #[error("Invalid email address: '{0}'")]
    InvalidEmail(String),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one
/// non-whitespace character. The input is trimmed of leading and trailing
/// whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the
    /// trimmed result is empty, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A personal name with normalized casing.
///
/// Names are trimmed and title-cased per whitespace-separated word, so
/// `"ada  LOVELACE"` becomes `"Ada Lovelace"`. Comparing two `PersonName`
/// values therefore compares the normalized form, which is what the
/// appointment conflict check relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Creates a new `PersonName`, normalizing whitespace and casing.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the input contains no
    /// non-whitespace characters.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let normalized = input
            .as_ref()
            .split_whitespace()
            .map(title_case_word)
            .collect::<Vec<_>>()
            .join(" ");

        if normalized.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(normalized))
    }

    /// Returns the normalized name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// A patient's national identifier, the unique patient key.
///
/// The identifier is trimmed and must consist of ASCII letters and digits
/// only. It implements `Ord` and `Hash` so it can key the patient map and
/// serve as a JSON object key in the persisted snapshot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NationalId(String);

impl NationalId {
    /// Validates and creates a new `NationalId`.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for blank input and
    /// `TextError::InvalidNationalId` if any character is outside the
    /// ASCII alphanumeric set.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TextError::InvalidNationalId(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A structurally valid email address.
///
/// Validation is deliberately minimal: one `@`, non-empty local and
/// domain parts, no whitespace. Deliverability is not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and validates an email address.
    ///
    /// # Errors
    ///
    /// Returns `TextError::InvalidEmail` if the input fails the
    /// structural checks.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        let invalid = || TextError::InvalidEmail(trimmed.to_owned());

        if trimmed.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(invalid());
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! impl_text_traits {
    ($ty:ident, $construct:expr) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $construct(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

impl_text_traits!(NonEmptyText, NonEmptyText::new);
impl_text_traits!(PersonName, PersonName::new);
impl_text_traits!(NationalId, NationalId::new);
impl_text_traits!(EmailAddress, EmailAddress::parse);
