use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use crate::detection::domain::landmark_provider::LandmarkProvider;
use crate::imaging::infrastructure::data_url_decoder::{decode_data_url, ImageDecodeError};
use crate::scoring::domain::smile_score::SmileScore;
use crate::scoring::domain::smile_scorer::SmileScorer;
use crate::shared::frame::Frame;

/// Outcome of scoring one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameAnalysis {
    pub score: SmileScore,
    pub face_detected: bool,
}

impl FrameAnalysis {
    pub fn coins(&self) -> u32 {
        self.score.coins()
    }
}

/// Single-frame pipeline: decode → detect landmarks → score.
///
/// Only a malformed image payload is reported to the caller. A missing
/// face, a provider failure, or a scoring fault all produce a zero score
/// so the game loop keeps running.
pub struct AnalyzeFrameUseCase {
    provider: Mutex<Box<dyn LandmarkProvider>>,
    scorer: SmileScorer,
}

impl AnalyzeFrameUseCase {
    pub fn new(provider: Box<dyn LandmarkProvider>, scorer: SmileScorer) -> Self {
        Self {
            provider: Mutex::new(provider),
            scorer,
        }
    }

    pub fn scorer(&self) -> &SmileScorer {
        &self.scorer
    }

    pub fn execute_data_url(&self, data_url: &str) -> Result<FrameAnalysis, ImageDecodeError> {
        let start = Instant::now();
        let frame = decode_data_url(data_url)?;
        log::debug!(
            "Decoded {}x{} frame in {:.1}ms",
            frame.width(),
            frame.height(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(self.execute(&frame))
    }

    pub fn execute(&self, frame: &Frame) -> FrameAnalysis {
        let start = Instant::now();
        let detected = {
            // The provider is left in a usable state even if a previous
            // inference panicked; the next frame starts from scratch.
            let mut provider = self.provider.lock().unwrap_or_else(PoisonError::into_inner);
            provider.detect(frame)
        };
        log::debug!(
            "Landmark detection took {:.1}ms",
            start.elapsed().as_secs_f64() * 1000.0
        );

        match detected {
            Ok(Some(landmarks)) => FrameAnalysis {
                score: self.scorer.score(&landmarks, frame.dimensions()),
                face_detected: true,
            },
            Ok(None) => FrameAnalysis {
                score: SmileScore::ZERO,
                face_detected: false,
            },
            Err(e) => {
                log::warn!("Landmark detection failed, scoring 0: {e}");
                FrameAnalysis {
                    score: SmileScore::ZERO,
                    face_detected: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::landmark_layout::{LandmarkLayout, LandmarkRole};
    use crate::detection::domain::landmark_set::LandmarkSet;
    use crate::detection::infrastructure::fixed_landmark_provider::FixedLandmarkProvider;
    use crate::shared::geometry::Point2D;
    use base64::Engine;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // --- Stubs ---

    struct FailingProvider;

    impl LandmarkProvider for FailingProvider {
        fn detect(
            &mut self,
            _frame: &Frame,
        ) -> Result<Option<LandmarkSet>, Box<dyn std::error::Error>> {
            Err("inference exploded".into())
        }
    }

    struct CountingProvider {
        calls: Arc<AtomicUsize>,
    }

    impl LandmarkProvider for CountingProvider {
        fn detect(
            &mut self,
            _frame: &Frame,
        ) -> Result<Option<LandmarkSet>, Box<dyn std::error::Error>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    // --- Helpers ---

    fn smiling_face(ratio: f64) -> LandmarkSet {
        let layout = LandmarkLayout::FaceMesh468;
        let mut points = vec![Point2D::new(0.5, 0.5); layout.point_count()];
        points[layout.index_of(LandmarkRole::LeftMouthCorner)] = Point2D::new(0.0, 0.7);
        points[layout.index_of(LandmarkRole::RightMouthCorner)] = Point2D::new(ratio, 0.7);
        points[layout.index_of(LandmarkRole::LeftFaceEdge)] = Point2D::new(0.0, 0.5);
        points[layout.index_of(LandmarkRole::RightFaceEdge)] = Point2D::new(1.0, 0.5);
        LandmarkSet::new(points, layout)
    }

    fn frame() -> Frame {
        Frame::new(vec![0u8; 1000 * 1000 * 3], 1000, 1000, 3)
    }

    fn use_case(provider: impl LandmarkProvider + 'static) -> AnalyzeFrameUseCase {
        AnalyzeFrameUseCase::new(Box::new(provider), SmileScorer::default())
    }

    fn png_data_url(width: u32, height: u32) -> String {
        let img = image::RgbImage::new(width, height);
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(bytes)
        )
    }

    // --- Tests ---

    #[test]
    fn test_face_is_scored() {
        let uc = use_case(FixedLandmarkProvider::new(Some(smiling_face(0.5))));
        let analysis = uc.execute(&frame());
        assert!(analysis.face_detected);
        assert_eq!(analysis.score.value(), 50);
        assert_eq!(analysis.coins(), 250);
    }

    #[test]
    fn test_no_face_scores_zero_with_zero_coins() {
        let uc = use_case(FixedLandmarkProvider::no_face());
        let analysis = uc.execute(&frame());
        assert!(!analysis.face_detected);
        assert_eq!(analysis.score, SmileScore::ZERO);
        assert_eq!(analysis.coins(), 0);
    }

    #[test]
    fn test_provider_failure_scores_zero() {
        let analysis = use_case(FailingProvider).execute(&frame());
        assert_eq!(analysis.score, SmileScore::ZERO);
        assert!(!analysis.face_detected);
    }

    #[test]
    fn test_degenerate_landmarks_score_zero_but_face_detected() {
        let set = LandmarkSet::new(vec![Point2D::new(0.5, 0.5); 468], LandmarkLayout::FaceMesh468);
        let analysis = use_case(FixedLandmarkProvider::new(Some(set))).execute(&frame());
        assert!(analysis.face_detected);
        assert_eq!(analysis.score, SmileScore::ZERO);
    }

    #[test]
    fn test_scores_against_decoded_frame_dimensions() {
        let uc = use_case(FixedLandmarkProvider::new(Some(smiling_face(0.6))));
        let analysis = uc.execute_data_url(&png_data_url(16, 9)).unwrap();
        assert_eq!(analysis.score.value(), 100);
    }

    #[test]
    fn test_bad_payload_is_reported() {
        let calls = Arc::new(AtomicUsize::new(0));
        let uc = use_case(CountingProvider {
            calls: Arc::clone(&calls),
        });
        assert!(uc.execute_data_url("no comma here").is_err());
        assert!(uc.execute_data_url("data:image/png;base64,!!!").is_err());
        // The provider never sees a frame that failed to decode
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_shared_across_threads() {
        let uc = Arc::new(use_case(FixedLandmarkProvider::new(Some(smiling_face(0.5)))));
        std::thread::scope(|s| {
            for _ in 0..4 {
                let uc = Arc::clone(&uc);
                s.spawn(move || {
                    let f = Frame::new(vec![0u8; 10 * 10 * 3], 10, 10, 3);
                    assert_eq!(uc.execute(&f).score.value(), 50);
                });
            }
        });
    }
}
