//! VAT-inclusive fee calculation.

use crate::{ClinicError, ClinicResult};

/// Rejects fees that are negative or not finite.
pub(crate) fn validate_fee(fee: f64) -> ClinicResult<()> {
    if !fee.is_finite() || fee < 0.0 {
        return Err(ClinicError::InvalidFee(fee));
    }
    Ok(())
}

/// Returns the VAT-inclusive total for a net fee.
///
/// The result is `fee x (1 + rate)`, rounded to 2 decimal places.
///
/// # Errors
///
/// Returns `ClinicError::InvalidFee` for a negative or non-finite fee and
/// `ClinicError::InvalidInput` for a negative or non-finite rate.
pub fn fee_with_vat(fee: f64, rate: f64) -> ClinicResult<f64> {
    validate_fee(fee)?;

    if !rate.is_finite() || rate < 0.0 {
        return Err(ClinicError::InvalidInput(format!(
            "VAT rate must be finite and non-negative, got {rate}"
        )));
    }

    let gross = fee * (1.0 + rate);
    Ok((gross * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_VAT_RATE;

    #[test]
    fn default_rate_turns_1000_into_1200() {
        let gross = fee_with_vat(1000.0, DEFAULT_VAT_RATE).expect("should compute");
        assert_eq!(gross, 1200.0);
    }

    #[test]
    fn zero_rate_returns_the_net_fee() {
        let gross = fee_with_vat(750.0, 0.0).expect("should compute");
        assert_eq!(gross, 750.0);
    }

    #[test]
    fn result_is_rounded_to_two_decimals() {
        let gross = fee_with_vat(125.5, 0.2).expect("should compute");
        assert_eq!(gross, 150.6);

        let gross = fee_with_vat(99.99, 0.18).expect("should compute");
        assert_eq!(gross, 117.99);
    }

    #[test]
    fn zero_fee_stays_zero() {
        let gross = fee_with_vat(0.0, DEFAULT_VAT_RATE).expect("should compute");
        assert_eq!(gross, 0.0);
    }

    #[test]
    fn negative_fee_is_rejected() {
        let err = fee_with_vat(-10.0, DEFAULT_VAT_RATE).expect_err("should reject");
        assert!(matches!(err, ClinicError::InvalidFee(_)));
    }

    #[test]
    fn bad_rate_is_rejected() {
        for rate in [-0.2, f64::NAN, f64::INFINITY] {
            let err = fee_with_vat(100.0, rate).expect_err("should reject");
            assert!(matches!(err, ClinicError::InvalidInput(_)));
        }
    }
}
