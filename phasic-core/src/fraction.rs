use std::convert::TryFrom;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A volume fraction or threshold bounded to `[0.0, 1.0]`.
///
/// Used wherever a configured value must be a valid phase fraction, such as
/// a phase's residual alpha or a blending threshold.
/// Deserializing an out-of-range value fails with a [`FractionError`].
///
/// # Examples
/// ```
/// use phasic_core::Fraction;
///
/// let threshold = Fraction::new(0.3).unwrap();
/// assert_eq!(threshold.get(), 0.3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Fraction(f64);

impl Fraction {
    /// Default residual volume fraction below which a phase is treated as absent.
    pub const RESIDUAL: Self = Self(1e-6);

    /// Creates a `Fraction` if `value` is within `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::NotFinite`] if `value` is `NaN` or infinite.
    /// Returns [`FractionError::OutOfRange`] if `value` lies outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self, FractionError> {
        if !value.is_finite() {
            return Err(FractionError::NotFinite(value));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(FractionError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Returns the inner `f64`.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Fraction {
    type Error = FractionError;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Fraction::new(value)
    }
}

impl From<Fraction> for f64 {
    fn from(f: Fraction) -> Self {
        f.0
    }
}

/// Errors that can occur when constructing a [`Fraction`].
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum FractionError {
    #[error("fraction is not finite: {0}")]
    NotFinite(f64),

    #[error("fraction {0} is outside the range [0, 1]")]
    OutOfRange(f64),
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn accepts_unit_interval() {
        assert_eq!(Fraction::new(0.0).unwrap().get(), 0.0);
        assert_eq!(Fraction::new(1.0).unwrap().get(), 1.0);
        assert_eq!(f64::from(Fraction::new(0.25).unwrap()), 0.25);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            Fraction::new(-1e-9),
            Err(FractionError::OutOfRange(_))
        ));
        assert!(matches!(
            Fraction::new(1.5),
            Err(FractionError::OutOfRange(_))
        ));
        assert!(matches!(
            Fraction::new(f64::NAN),
            Err(FractionError::NotFinite(_))
        ));
    }

    #[test]
    fn deserializes_through_validation() {
        #[derive(Debug, serde::Deserialize)]
        struct Threshold {
            alpha: Fraction,
        }

        let ok: Threshold = toml::from_str("alpha = 0.3").unwrap();
        assert_eq!(ok.alpha.get(), 0.3);
        assert!(toml::from_str::<Threshold>("alpha = 1.3").is_err());
    }
}
