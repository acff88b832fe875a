//! Smile scoring from facial landmarks.
//!
//! The score is the mouth-corner distance divided by the face width, both
//! measured in pixels, mapped linearly through a [`Calibration`] and clamped
//! to `[0, 100]`. Dividing by face width makes the score independent of how
//! far the player sits from the camera.

use thiserror::Error;

use crate::detection::domain::landmark_layout::LandmarkRole;
use crate::detection::domain::landmark_set::LandmarkSet;
use crate::scoring::domain::calibration::Calibration;
use crate::scoring::domain::smile_score::SmileScore;
use crate::shared::geometry::{ImageDimensions, Point2D};

#[derive(Error, Debug, PartialEq)]
pub enum ScoringError {
    #[error("image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("{role} (index {index}) missing from a set of {len} landmarks")]
    MissingLandmark {
        role: LandmarkRole,
        index: usize,
        len: usize,
    },
    #[error("{role} has non-finite coordinates")]
    NonFiniteLandmark { role: LandmarkRole },
    #[error("face edges coincide, face width is zero")]
    DegenerateFaceWidth,
    #[error("smile ratio is not finite")]
    NonFiniteRatio,
}

/// Pixel-space measurements behind a score, exposed for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmileMeasurement {
    pub smile_width: f64,
    pub face_width: f64,
    pub smile_ratio: f64,
}

/// Stateless scorer; safe to share across request threads.
#[derive(Clone, Debug, Default)]
pub struct SmileScorer {
    calibration: Calibration,
}

impl SmileScorer {
    pub fn new(calibration: Calibration) -> Self {
        Self { calibration }
    }

    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    /// Score a face. Never fails: any scoring fault yields zero.
    pub fn score(&self, landmarks: &LandmarkSet, dims: ImageDimensions) -> SmileScore {
        match self.try_score(landmarks, dims) {
            Ok(score) => score,
            Err(e) => {
                log::debug!("Smile scoring fell back to 0: {e}");
                SmileScore::ZERO
            }
        }
    }

    pub fn try_score(
        &self,
        landmarks: &LandmarkSet,
        dims: ImageDimensions,
    ) -> Result<SmileScore, ScoringError> {
        let m = measure(landmarks, dims)?;
        Ok(SmileScore::from_raw(self.calibration.raw_score(m.smile_ratio)))
    }
}

/// Distances and ratio for the four scoring landmarks.
pub fn measure(
    landmarks: &LandmarkSet,
    dims: ImageDimensions,
) -> Result<SmileMeasurement, ScoringError> {
    if dims.is_empty() {
        return Err(ScoringError::InvalidDimensions {
            width: dims.width,
            height: dims.height,
        });
    }

    let left_mouth = pixel_point(landmarks, LandmarkRole::LeftMouthCorner, dims)?;
    let right_mouth = pixel_point(landmarks, LandmarkRole::RightMouthCorner, dims)?;
    let left_edge = pixel_point(landmarks, LandmarkRole::LeftFaceEdge, dims)?;
    let right_edge = pixel_point(landmarks, LandmarkRole::RightFaceEdge, dims)?;

    let smile_width = left_mouth.distance(&right_mouth);
    let face_width = left_edge.distance(&right_edge);
    if face_width <= 0.0 {
        return Err(ScoringError::DegenerateFaceWidth);
    }

    let smile_ratio = smile_width / face_width;
    if !smile_ratio.is_finite() {
        return Err(ScoringError::NonFiniteRatio);
    }

    Ok(SmileMeasurement {
        smile_width,
        face_width,
        smile_ratio,
    })
}

fn pixel_point(
    landmarks: &LandmarkSet,
    role: LandmarkRole,
    dims: ImageDimensions,
) -> Result<Point2D, ScoringError> {
    let point = landmarks
        .get(role)
        .ok_or_else(|| ScoringError::MissingLandmark {
            role,
            index: landmarks.layout().index_of(role),
            len: landmarks.len(),
        })?;
    if !point.is_finite() {
        return Err(ScoringError::NonFiniteLandmark { role });
    }
    Ok(point.to_pixels(dims))
}
