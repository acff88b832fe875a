//! Index conventions of the supported landmark models.
//!
//! The scorer only ever asks for a semantic role; this table is the single
//! place that knows which raw index a given model assigns to that role.

use serde::{Deserialize, Serialize};

use crate::scoring::domain::calibration::Calibration;

/// Facial features the smile scorer reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LandmarkRole {
    LeftMouthCorner,
    RightMouthCorner,
    LeftFaceEdge,
    RightFaceEdge,
}

impl LandmarkRole {
    pub const ALL: [LandmarkRole; 4] = [
        LandmarkRole::LeftMouthCorner,
        LandmarkRole::RightMouthCorner,
        LandmarkRole::LeftFaceEdge,
        LandmarkRole::RightFaceEdge,
    ];
}

impl std::fmt::Display for LandmarkRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LandmarkRole::LeftMouthCorner => write!(f, "left mouth corner"),
            LandmarkRole::RightMouthCorner => write!(f, "right mouth corner"),
            LandmarkRole::LeftFaceEdge => write!(f, "left face edge"),
            LandmarkRole::RightFaceEdge => write!(f, "right face edge"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkLayout {
    /// 468-point face mesh. Face edges are the cheek contour points.
    #[default]
    #[serde(rename = "face_mesh_468")]
    FaceMesh468,
    /// 68-point iBUG annotation. Outer eye corners stand in for the face
    /// edges, so this layout needs its own calibration.
    #[serde(rename = "ibug_68")]
    Ibug68,
}

impl LandmarkLayout {
    /// Number of points a model with this layout emits per face.
    pub fn point_count(&self) -> usize {
        match self {
            LandmarkLayout::FaceMesh468 => 468,
            LandmarkLayout::Ibug68 => 68,
        }
    }

    pub fn index_of(&self, role: LandmarkRole) -> usize {
        match (self, role) {
            (LandmarkLayout::FaceMesh468, LandmarkRole::LeftMouthCorner) => 61,
            (LandmarkLayout::FaceMesh468, LandmarkRole::RightMouthCorner) => 291,
            (LandmarkLayout::FaceMesh468, LandmarkRole::LeftFaceEdge) => 234,
            (LandmarkLayout::FaceMesh468, LandmarkRole::RightFaceEdge) => 454,
            (LandmarkLayout::Ibug68, LandmarkRole::LeftMouthCorner) => 48,
            (LandmarkLayout::Ibug68, LandmarkRole::RightMouthCorner) => 54,
            (LandmarkLayout::Ibug68, LandmarkRole::LeftFaceEdge) => 36,
            (LandmarkLayout::Ibug68, LandmarkRole::RightFaceEdge) => 45,
        }
    }

    /// Thresholds tuned for this layout's reference span.
    pub fn default_calibration(&self) -> Calibration {
        match self {
            LandmarkLayout::FaceMesh468 => Calibration::default(),
            LandmarkLayout::Ibug68 => Calibration::EYE_SPAN,
        }
    }
}
