use crate::shared::geometry::ImageDimensions;

/// Axis-aligned face box in pixel coordinates with its detector score.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub score: f64,
}

impl FaceBox {
    pub fn iou(&self, other: &FaceBox) -> f64 {
        let ix1 = self.x.max(other.x);
        let iy1 = self.y.max(other.y);
        let ix2 = (self.x + self.width).min(other.x + other.width);
        let iy2 = (self.y + self.height).min(other.y + other.height);

        let inter = (ix2 - ix1).max(0.0) * (iy2 - iy1).max(0.0);
        if inter == 0.0 {
            return 0.0;
        }

        let area_a = self.width * self.height;
        let area_b = other.width * other.height;
        inter / (area_a + area_b - inter)
    }

    /// Square crop window centered on the box, `scale` times its larger
    /// side, clamped to the frame.
    ///
    /// Landmark models expect some context around the face; a tight
    /// detector box cuts off the jaw line.
    pub fn square_crop(&self, scale: f64, dims: ImageDimensions) -> FaceBox {
        let fw = dims.width as f64;
        let fh = dims.height as f64;
        let side = (self.width.max(self.height) * scale).min(fw.min(fh));
        let cx = self.x + self.width / 2.0;
        let cy = self.y + self.height / 2.0;

        let x = (cx - side / 2.0).clamp(0.0, (fw - side).max(0.0));
        let y = (cy - side / 2.0).clamp(0.0, (fh - side).max(0.0));

        FaceBox {
            x,
            y,
            width: side,
            height: side,
            score: self.score,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
