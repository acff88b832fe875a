/// 468-point face mesh landmark provider using ONNX Runtime via `ort`.
///
/// Two stages: BlazeFace locates the face, then the face-landmark model
/// runs on a square crop around it. Landmarks are mapped back to
/// normalized full-frame coordinates.
use std::path::Path;

use crate::detection::domain::face_box::FaceBox;
use crate::detection::domain::landmark_layout::LandmarkLayout;
use crate::detection::domain::landmark_provider::LandmarkProvider;
use crate::detection::domain::landmark_set::LandmarkSet;
use crate::detection::infrastructure::execution_provider::load_session;
use crate::detection::infrastructure::onnx_blazeface_detector::OnnxBlazefaceDetector;
use crate::shared::frame::Frame;
use crate::shared::geometry::Point2D;

/// Face-landmark model input resolution.
const INPUT_SIZE: u32 = 192;

/// Default face presence / detection threshold.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Crop side relative to the detector box's larger side.
const CROP_SCALE: f64 = 1.5;

/// x, y, z per landmark.
const VALUES_PER_LANDMARK: usize = 3;

pub struct OnnxFaceMeshProvider {
    detector: OnnxBlazefaceDetector,
    session: ort::session::Session,
    confidence: f64,
}

impl OnnxFaceMeshProvider {
    pub fn new(
        detector_model: &Path,
        landmark_model: &Path,
        confidence: f64,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let detector = OnnxBlazefaceDetector::new(detector_model, confidence)?;
        let session = load_session(landmark_model)?;
        Ok(Self {
            detector,
            session,
            confidence,
        })
    }

    /// Raw landmark values and the face-presence logit, if the model has one.
    fn run_landmarks(
        &mut self,
        frame: &Frame,
        crop: &FaceBox,
    ) -> Result<(Vec<f32>, Option<f32>), Box<dyn std::error::Error>> {
        let input_tensor = preprocess_crop(frame, crop, INPUT_SIZE);
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;

        let expected = LandmarkLayout::FaceMesh468.point_count() * VALUES_PER_LANDMARK;
        let mut landmarks = None;
        let mut presence = None;
        for i in 0..outputs.len() {
            let array = outputs[i].try_extract_array::<f32>()?;
            match array.len() {
                n if n == expected => landmarks = Some(array.iter().copied().collect()),
                1 => presence = array.iter().next().copied(),
                _ => {}
            }
        }

        let landmarks = landmarks
            .ok_or_else(|| format!("face landmark model has no output with {expected} values"))?;
        Ok((landmarks, presence))
    }
}

impl LandmarkProvider for OnnxFaceMeshProvider {
    fn detect(&mut self, frame: &Frame) -> Result<Option<LandmarkSet>, Box<dyn std::error::Error>> {
        let Some(face) = self.detector.detect(frame)?.into_iter().next() else {
            log::debug!("No face box above {:.2}", self.confidence);
            return Ok(None);
        };

        let crop = face.square_crop(CROP_SCALE, frame.dimensions());
        if crop.is_empty() {
            return Ok(None);
        }

        let (raw, presence_logit) = self.run_landmarks(frame, &crop)?;
        if let Some(logit) = presence_logit {
            let presence = sigmoid(logit) as f64;
            if presence < self.confidence {
                log::debug!("Face presence {presence:.2} below threshold");
                return Ok(None);
            }
        }

        let points = to_frame_points(&raw, &crop, frame.width() as f64, frame.height() as f64);
        Ok(Some(LandmarkSet::new(points, LandmarkLayout::FaceMesh468)))
    }
}

/// Sample the crop window to `size × size`, normalized to [0,1] NCHW.
fn preprocess_crop(frame: &Frame, crop: &FaceBox, size: u32) -> ndarray::Array4<f32> {
    let src = frame.as_ndarray();
    let max_y = frame.height() as usize - 1;
    let max_x = frame.width() as usize - 1;
    let s = size as usize;
    let step_x = crop.width / s as f64;
    let step_y = crop.height / s as f64;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, s, s));

    for y in 0..s {
        let src_y = ((crop.y + (y as f64 + 0.5) * step_y) as usize).min(max_y);
        for x in 0..s {
            let src_x = ((crop.x + (x as f64 + 0.5) * step_x) as usize).min(max_x);
            for c in 0..3 {
                tensor[[0, c, y, x]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    tensor
}

/// Map model-space landmarks (crop pixels at `INPUT_SIZE`) to normalized
/// full-frame coordinates. The z channel is dropped.
fn to_frame_points(raw: &[f32], crop: &FaceBox, fw: f64, fh: f64) -> Vec<Point2D> {
    let size = INPUT_SIZE as f64;
    raw.chunks_exact(VALUES_PER_LANDMARK)
        .map(|v| {
            let px = crop.x + v[0] as f64 / size * crop.width;
            let py = crop.y + v[1] as f64 / size * crop.height;
            Point2D::new(px / fw, py / fh)
        })
        .collect()
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
