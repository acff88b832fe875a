use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MIN_RATIO: f64 = 0.40;
pub const DEFAULT_MAX_RATIO: f64 = 0.60;

#[derive(Error, Debug, PartialEq)]
pub enum CalibrationError {
    #[error("calibration ratios must be finite, got min={min_ratio} max={max_ratio}")]
    NonFinite { min_ratio: f64, max_ratio: f64 },
    #[error("min_ratio ({min_ratio}) must be below max_ratio ({max_ratio})")]
    Inverted { min_ratio: f64, max_ratio: f64 },
}

/// Linear mapping from smile ratio to score.
///
/// `min_ratio` maps to 0 (neutral face), `max_ratio` to 100 (full smile).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Calibration {
    min_ratio: f64,
    max_ratio: f64,
}

impl Calibration {
    /// Thresholds for a mouth width measured against the outer eye corners.
    pub const EYE_SPAN: Calibration = Calibration {
        min_ratio: 0.60,
        max_ratio: 0.90,
    };

    pub fn new(min_ratio: f64, max_ratio: f64) -> Result<Self, CalibrationError> {
        if !min_ratio.is_finite() || !max_ratio.is_finite() {
            return Err(CalibrationError::NonFinite {
                min_ratio,
                max_ratio,
            });
        }
        if min_ratio >= max_ratio {
            return Err(CalibrationError::Inverted {
                min_ratio,
                max_ratio,
            });
        }
        Ok(Self {
            min_ratio,
            max_ratio,
        })
    }

    pub fn min_ratio(&self) -> f64 {
        self.min_ratio
    }

    pub fn max_ratio(&self) -> f64 {
        self.max_ratio
    }

    /// Unclamped linear score: 0 at `min_ratio`, 100 at `max_ratio`.
    pub fn raw_score(&self, ratio: f64) -> f64 {
        (ratio - self.min_ratio) / (self.max_ratio - self.min_ratio) * 100.0
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            min_ratio: DEFAULT_MIN_RATIO,
            max_ratio: DEFAULT_MAX_RATIO,
        }
    }
}

fn default_min() -> f64 {
    DEFAULT_MIN_RATIO
}

fn default_max() -> f64 {
    DEFAULT_MAX_RATIO
}

// Deserialization goes through `new` so a settings file cannot smuggle in
// an inverted range.
impl<'de> Deserialize<'de> for Calibration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default = "default_min")]
            min_ratio: f64,
            #[serde(default = "default_max")]
            max_ratio: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Calibration::new(raw.min_ratio, raw.max_ratio).map_err(serde::de::Error::custom)
    }
}
