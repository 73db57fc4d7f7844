//! Weight-based dose calculators.
//!
//! - [`compute_dose`]: pediatric volume for a calculable catalog record
//! - [`hydration`] and [`ibuprofen_dose`]: fixed-formula calculators independent of the catalog

mod dose;
mod supplemental;

pub use dose::*;
pub use supplemental::*;

use thiserror::Error;

/// Calculator errors. All are local to one calculation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Enter a valid weight")]
    InvalidWeight,

    #[error("No dosing formula for this medication")]
    NoDosingFormula,

    #[error("Missing or invalid concentration")]
    InvalidConcentration,

    #[error("Invalid dose intervals: {0:?}")]
    InvalidIntervals(String),
}

impl CalcError {
    /// True when the record's data is at fault rather than the user's input.
    ///
    /// The presentation disables the calculator for such records.
    pub fn is_data_integrity(&self) -> bool {
        !matches!(self, CalcError::InvalidWeight)
    }
}

pub type CalcResult<T> = Result<T, CalcError>;

/// Accept only a present, finite, positive weight.
pub fn validate_weight(weight_kg: Option<f64>) -> CalcResult<f64> {
    match weight_kg {
        Some(w) if w.is_finite() && w > 0.0 => Ok(w),
        _ => Err(CalcError::InvalidWeight),
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_weight() {
        assert_eq!(validate_weight(Some(12.5)), Ok(12.5));
        assert_eq!(validate_weight(Some(0.0)), Err(CalcError::InvalidWeight));
        assert_eq!(validate_weight(Some(-3.0)), Err(CalcError::InvalidWeight));
        assert_eq!(validate_weight(None), Err(CalcError::InvalidWeight));
        assert_eq!(validate_weight(Some(f64::NAN)), Err(CalcError::InvalidWeight));
        assert_eq!(validate_weight(Some(f64::INFINITY)), Err(CalcError::InvalidWeight));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.6666, 1), 2.7);
        assert_eq!(round_to(5.3333, 1), 5.3);
        assert_eq!(round_to(0.25, 1), 0.3);
        assert_eq!(round_to(1599.5, 0), 1600.0);
    }

    #[test]
    fn test_data_integrity_classification() {
        assert!(!CalcError::InvalidWeight.is_data_integrity());
        assert!(CalcError::NoDosingFormula.is_data_integrity());
        assert!(CalcError::InvalidConcentration.is_data_integrity());
        assert!(CalcError::InvalidIntervals("x".into()).is_data_integrity());
    }
}
