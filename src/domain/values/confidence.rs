use serde::{Deserialize, Serialize};
use std::fmt;

/// Match confidence in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    /// Clamps a raw similarity into range. NaN maps to zero.
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            return Confidence(0.0);
        }
        Confidence(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_clamps() {
        assert_eq!(Confidence::saturating(-0.4).value(), 0.0);
        assert_eq!(Confidence::saturating(1.0000001).value(), 1.0);
        assert_eq!(Confidence::saturating(f64::NAN).value(), 0.0);
        assert_eq!(Confidence::saturating(0.9).value(), 0.9);
    }
}
