use crate::detection::domain::landmark_set::LandmarkSet;
use crate::shared::frame::Frame;

/// Domain interface for facial landmark detection.
///
/// Yields the landmarks of at most one face; `Ok(None)` means no face was
/// found. Implementations may hold inference sessions, hence `&mut self`.
pub trait LandmarkProvider: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Option<LandmarkSet>, Box<dyn std::error::Error>>;
}
