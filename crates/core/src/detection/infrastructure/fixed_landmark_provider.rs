use crate::detection::domain::landmark_provider::LandmarkProvider;
use crate::detection::domain::landmark_set::LandmarkSet;
use crate::shared::frame::Frame;

/// Returns the same answer for every frame.
///
/// Stands in for a model-backed provider when the server runs without
/// models, and in tests that need a known face.
pub struct FixedLandmarkProvider {
    landmarks: Option<LandmarkSet>,
}

impl FixedLandmarkProvider {
    pub fn new(landmarks: Option<LandmarkSet>) -> Self {
        Self { landmarks }
    }

    /// Provider that never finds a face.
    pub fn no_face() -> Self {
        Self::new(None)
    }
}

impl LandmarkProvider for FixedLandmarkProvider {
    fn detect(&mut self, _frame: &Frame) -> Result<Option<LandmarkSet>, Box<dyn std::error::Error>> {
        Ok(self.landmarks.clone())
    }
}
