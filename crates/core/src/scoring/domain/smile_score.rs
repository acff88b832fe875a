use serde::Serialize;

use crate::shared::constants::{COINS_PER_POINT, MAX_SCORE};

/// Integer smile score in `[0, 100]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SmileScore(u8);

impl SmileScore {
    pub const ZERO: SmileScore = SmileScore(0);
    pub const MAX: SmileScore = SmileScore(MAX_SCORE);

    /// Clamps `raw` to `[0, 100]` then truncates toward zero.
    /// NaN maps to zero.
    pub fn from_raw(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::ZERO;
        }
        Self(raw.clamp(0.0, MAX_SCORE as f64).trunc() as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn coins(&self) -> u32 {
        self.0 as u32 * COINS_PER_POINT
    }
}

impl std::fmt::Display for SmileScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0.0, 0)]
    #[case::truncates(49.99, 49)]
    #[case::exact(50.0, 50)]
    #[case::hundred(100.0, 100)]
    #[case::negative_clamped(-35.0, 0)]
    #[case::small_negative_clamped(-0.5, 0)]
    #[case::above_clamped(250.0, 100)]
    #[case::neg_infinity(f64::NEG_INFINITY, 0)]
    #[case::infinity(f64::INFINITY, 100)]
    #[case::nan(f64::NAN, 0)]
    fn test_from_raw(#[case] raw: f64, #[case] expected: u8) {
        assert_eq!(SmileScore::from_raw(raw).value(), expected);
    }

    #[test]
    fn test_coins_are_five_per_point() {
        assert_eq!(SmileScore::from_raw(42.0).coins(), 210);
        assert_eq!(SmileScore::ZERO.coins(), 0);
        assert_eq!(SmileScore::MAX.coins(), 500);
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        assert_eq!(serde_json::to_string(&SmileScore::from_raw(73.0)).unwrap(), "73");
    }
}
