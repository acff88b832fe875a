pub const FACE_DETECTOR_MODEL_NAME: &str = "blaze_face_short_range.onnx";
pub const FACE_LANDMARK_MODEL_NAME: &str = "face_landmark.onnx";

/// Cache folder name under the platform cache/data directory.
pub const APP_DIR_NAME: &str = "SmileHard";

/// Coins awarded per score point.
pub const COINS_PER_POINT: u32 = 5;

pub const MAX_SCORE: u8 = 100;

pub const LEADERBOARD_CAPACITY: usize = 10;
pub const ANONYMOUS_USERNAME: &str = "Anonymous";

/// Entries present on a freshly started server.
pub const DEMO_LEADERBOARD: &[(&str, u32)] = &[
    ("GrinMaster", 950),
    ("GiggleQueen", 820),
    ("BeamBot", 700),
];
