use serde::{Deserialize, Serialize};

/// A 2D point. Landmarks carry normalized image fractions; scoring converts
/// them to pixels before measuring distances.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Scale a normalized point into pixel space.
    pub fn to_pixels(self, dims: ImageDimensions) -> Point2D {
        Point2D {
            x: self.x * dims.width as f64,
            y: self.y * dims.height as f64,
        }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Pixel size of the analyzed image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_to_pixels_scales_each_axis() {
        let p = Point2D::new(0.25, 0.5).to_pixels(ImageDimensions::new(640, 480));
        assert_relative_eq!(p.x, 160.0);
        assert_relative_eq!(p.y, 240.0);
    }

    #[test]
    fn test_distance_pythagorean() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0);
        assert_relative_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let a = Point2D::new(12.5, -3.0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn test_is_finite_rejects_nan_and_inf() {
        assert!(Point2D::new(0.1, 0.2).is_finite());
        assert!(!Point2D::new(f64::NAN, 0.2).is_finite());
        assert!(!Point2D::new(0.1, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_empty_dimensions() {
        assert!(ImageDimensions::new(0, 10).is_empty());
        assert!(ImageDimensions::new(10, 0).is_empty());
        assert!(!ImageDimensions::new(1, 1).is_empty());
    }

    #[test]
    fn test_point_deserializes_from_object() {
        let p: Point2D = serde_json::from_str(r#"{"x": 0.5, "y": 0.75}"#).unwrap();
        assert_eq!(p, Point2D::new(0.5, 0.75));
    }
}
