//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the clinic service. The intent is to avoid re-reading paths or rates while the
//! registry is running, which keeps behaviour consistent across callers and test harnesses.

use crate::constants::{DEFAULT_DATA_FILE_NAME, DEFAULT_VAT_RATE};
use crate::{ClinicError, ClinicResult};
use std::path::{Path, PathBuf};

/// Clinic configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClinicConfig {
    data_file: PathBuf,
    vat_rate: f64,
}

impl ClinicConfig {
    /// Create a new `ClinicConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ClinicError::InvalidInput` if the data file path is empty
    /// or the VAT rate is negative or not finite.
    pub fn new(data_file: PathBuf, vat_rate: f64) -> ClinicResult<Self> {
        if data_file.as_os_str().is_empty() {
            return Err(ClinicError::InvalidInput(
                "data file path cannot be empty".into(),
            ));
        }

        if !vat_rate.is_finite() || vat_rate < 0.0 {
            return Err(ClinicError::InvalidInput(format!(
                "VAT rate must be finite and non-negative, got {vat_rate}"
            )));
        }

        Ok(Self {
            data_file,
            vat_rate,
        })
    }

    /// Create a configuration with the default VAT rate.
    pub fn with_default_rate(data_file: PathBuf) -> ClinicResult<Self> {
        Self::new(data_file, DEFAULT_VAT_RATE)
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn vat_rate(&self) -> f64 {
        self.vat_rate
    }
}

/// Resolve the conventional snapshot path inside a data directory.
pub fn default_data_file(data_dir: &Path) -> PathBuf {
    data_dir.join(DEFAULT_DATA_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_explicit_rate() {
        let cfg = ClinicConfig::new(PathBuf::from("clinic.json"), 0.08)
            .expect("ClinicConfig::new should succeed");
        assert_eq!(cfg.vat_rate(), 0.08);
        assert_eq!(cfg.data_file(), Path::new("clinic.json"));
    }

    #[test]
    fn with_default_rate_uses_the_constant() {
        let cfg = ClinicConfig::with_default_rate(PathBuf::from("clinic.json"))
            .expect("ClinicConfig::with_default_rate should succeed");
        assert_eq!(cfg.vat_rate(), DEFAULT_VAT_RATE);
    }

    #[test]
    fn new_rejects_empty_path() {
        let err = ClinicConfig::new(PathBuf::new(), DEFAULT_VAT_RATE)
            .expect_err("empty path should be rejected");
        assert!(matches!(err, ClinicError::InvalidInput(_)));
    }

    #[test]
    fn new_rejects_negative_or_non_finite_rate() {
        for rate in [-0.2, f64::NAN, f64::INFINITY] {
            let err = ClinicConfig::new(PathBuf::from("clinic.json"), rate)
                .expect_err("bad rate should be rejected");
            assert!(matches!(err, ClinicError::InvalidInput(_)));
        }
    }

    #[test]
    fn default_data_file_joins_the_conventional_name() {
        let path = default_data_file(Path::new("clinic_data"));
        assert_eq!(path, Path::new("clinic_data").join(DEFAULT_DATA_FILE_NAME));
    }
}
