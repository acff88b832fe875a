/// BlazeFace face detector using ONNX Runtime via `ort`.
///
/// Finds face boxes so the landmark model can run on a face-centered crop.
use std::path::Path;

use crate::detection::domain::face_box::FaceBox;
use crate::detection::infrastructure::execution_provider::load_session;
use crate::shared::frame::Frame;

/// BlazeFace model input resolution.
const INPUT_SIZE: u32 = 128;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f64 = 0.3;

/// Number of BlazeFace anchors (short-range model).
const NUM_ANCHORS: usize = 896;

/// Regressor values per anchor: box (4) + 6 keypoints (12).
const REGRESSOR_STRIDE: usize = 16;

pub struct OnnxBlazefaceDetector {
    session: ort::session::Session,
    confidence: f64,
    anchors: Vec<[f32; 2]>,
}

impl OnnxBlazefaceDetector {
    pub fn new(model_path: &Path, confidence: f64) -> Result<Self, Box<dyn std::error::Error>> {
        let session = load_session(model_path)?;
        Ok(Self {
            session,
            confidence,
            anchors: generate_anchors(),
        })
    }

    /// Face boxes above the confidence threshold, best first.
    pub fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
        let input_tensor = preprocess(frame, INPUT_SIZE);
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;

        // Two outputs: regressors [1, 896, 16] and classificators [1, 896, 1].
        // Exported models disagree on their order, so tell them apart by size.
        if outputs.len() < 2 {
            return Err(
                format!("BlazeFace model expected 2 outputs, got {}", outputs.len()).into(),
            );
        }
        let first = outputs[0].try_extract_array::<f32>()?;
        let second = outputs[1].try_extract_array::<f32>()?;
        let (regressors, scores) = if first.len() >= second.len() {
            (first, second)
        } else {
            (second, first)
        };
        let reg_data = regressors.as_slice().ok_or("Cannot get regressor slice")?;
        let score_data = scores.as_slice().ok_or("Cannot get score slice")?;

        let mut boxes = decode_boxes(
            reg_data,
            score_data,
            &self.anchors,
            self.confidence,
            frame.width() as f64,
            frame.height() as f64,
        );
        Ok(nms(&mut boxes, NMS_IOU_THRESH))
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Resize frame to `size × size` and normalize to [0,1] NCHW float32.
fn preprocess(frame: &Frame, size: u32) -> ndarray::Array4<f32> {
    let src = frame.as_ndarray();
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;
    let s = size as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, s, s));

    for y in 0..s {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / s as f64) as usize).min(src_h - 1);
        for x in 0..s {
            let src_x = (((x as f64 + 0.5) * src_w as f64 / s as f64) as usize).min(src_w - 1);
            for c in 0..3 {
                tensor[[0, c, y, x]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    tensor
}

// ---------------------------------------------------------------------------
// Anchors and decoding
// ---------------------------------------------------------------------------

/// Generate BlazeFace anchors for the short-range model.
///
/// The short-range model uses two feature map sizes: 16×16 and 8×8,
/// with 2 and 6 anchors per cell respectively.
fn generate_anchors() -> Vec<[f32; 2]> {
    let strides = [(8, 2), (16, 6)]; // (stride, anchors_per_cell)
    let mut anchors = Vec::with_capacity(NUM_ANCHORS);

    for &(stride, num) in &strides {
        let grid_size = INPUT_SIZE as usize / stride;
        for y in 0..grid_size {
            for x in 0..grid_size {
                let cx = (x as f32 + 0.5) / grid_size as f32;
                let cy = (y as f32 + 0.5) / grid_size as f32;
                for _ in 0..num {
                    anchors.push([cx, cy]);
                }
            }
        }
    }

    anchors
}

/// Decode anchor-relative boxes into frame pixels, dropping low scores.
fn decode_boxes(
    reg_data: &[f32],
    score_data: &[f32],
    anchors: &[[f32; 2]],
    confidence: f64,
    fw: f64,
    fh: f64,
) -> Vec<FaceBox> {
    let num_anchors = anchors.len().min(NUM_ANCHORS);
    let size = INPUT_SIZE as f64;
    let mut boxes = Vec::new();

    for (i, &raw_score) in score_data.iter().enumerate().take(num_anchors) {
        let score = sigmoid(raw_score) as f64;
        if score < confidence {
            continue;
        }

        let off = i * REGRESSOR_STRIDE;
        if off + 4 > reg_data.len() {
            break;
        }

        let cx = anchors[i][0] as f64 + reg_data[off] as f64 / size;
        let cy = anchors[i][1] as f64 + reg_data[off + 1] as f64 / size;
        let w = reg_data[off + 2] as f64 / size;
        let h = reg_data[off + 3] as f64 / size;

        let x1 = ((cx - w / 2.0) * fw).max(0.0);
        let y1 = ((cy - h / 2.0) * fh).max(0.0);
        let x2 = ((cx + w / 2.0) * fw).min(fw);
        let y2 = ((cy + h / 2.0) * fh).min(fh);

        let face = FaceBox {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
            score,
        };
        if !face.is_empty() {
            boxes.push(face);
        }
    }

    boxes
}

fn nms(boxes: &mut [FaceBox], iou_thresh: f64) -> Vec<FaceBox> {
    boxes.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep: Vec<FaceBox> = Vec::new();
    for candidate in boxes.iter() {
        if keep.iter().all(|k| k.iou(candidate) <= iou_thresh) {
            keep.push(candidate.clone());
        }
    }
    keep
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
