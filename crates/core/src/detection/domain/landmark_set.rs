use crate::detection::domain::landmark_layout::{LandmarkLayout, LandmarkRole};
use crate::shared::geometry::Point2D;

/// Landmarks of exactly one detected face, in normalized image coordinates.
///
/// Points are stored as the provider emitted them; nothing is validated on
/// construction so a short or corrupt set surfaces as a scoring error
/// rather than a panic.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkSet {
    points: Vec<Point2D>,
    layout: LandmarkLayout,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point2D>, layout: LandmarkLayout) -> Self {
        Self { points, layout }
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn layout(&self) -> LandmarkLayout {
        self.layout
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point for a semantic role, or `None` if the set is too short.
    pub fn get(&self, role: LandmarkRole) -> Option<Point2D> {
        self.points.get(self.layout.index_of(role)).copied()
    }

    pub fn left_mouth_corner(&self) -> Option<Point2D> {
        self.get(LandmarkRole::LeftMouthCorner)
    }

    pub fn right_mouth_corner(&self) -> Option<Point2D> {
        self.get(LandmarkRole::RightMouthCorner)
    }

    pub fn left_face_edge(&self) -> Option<Point2D> {
        self.get(LandmarkRole::LeftFaceEdge)
    }

    pub fn right_face_edge(&self) -> Option<Point2D> {
        self.get(LandmarkRole::RightFaceEdge)
    }
}
