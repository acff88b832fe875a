use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use smilehard_core::detection::infrastructure::onnx_face_mesh_provider::DEFAULT_CONFIDENCE;
use smilehard_core::scoring::domain::calibration::{Calibration, CalibrationError};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5001;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
    #[error("confidence must be between 0.0 and 1.0, got {0}")]
    Confidence(f64),
}

/// Server configuration, read from an optional JSON file.
///
/// Every field has a default, so `{}` is a valid settings file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub calibration: Calibration,
    pub confidence: f64,
    pub detector_model: Option<PathBuf>,
    pub landmark_model: Option<PathBuf>,
    pub models_dir: Option<PathBuf>,
    pub detector_model_url: Option<String>,
    pub landmark_model_url: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            calibration: Calibration::default(),
            confidence: DEFAULT_CONFIDENCE,
            detector_model: None,
            landmark_model: None,
            models_dir: None,
            detector_model_url: None,
            landmark_model_url: None,
        }
    }
}

/// Values given on the command line; each one that is set replaces the
/// file value.
#[derive(Clone, Debug, Default)]
pub struct SettingsOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub min_ratio: Option<f64>,
    pub max_ratio: Option<f64>,
    pub confidence: Option<f64>,
    pub detector_model: Option<PathBuf>,
    pub landmark_model: Option<PathBuf>,
    pub models_dir: Option<PathBuf>,
    pub detector_model_url: Option<String>,
    pub landmark_model_url: Option<String>,
}

impl ServerSettings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply(mut self, overrides: SettingsOverrides) -> Result<Self, SettingsError> {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if overrides.min_ratio.is_some() || overrides.max_ratio.is_some() {
            self.calibration = Calibration::new(
                overrides.min_ratio.unwrap_or(self.calibration.min_ratio()),
                overrides.max_ratio.unwrap_or(self.calibration.max_ratio()),
            )?;
        }
        if let Some(confidence) = overrides.confidence {
            self.confidence = confidence;
        }
        self.detector_model = overrides.detector_model.or(self.detector_model);
        self.landmark_model = overrides.landmark_model.or(self.landmark_model);
        self.models_dir = overrides.models_dir.or(self.models_dir);
        self.detector_model_url = overrides.detector_model_url.or(self.detector_model_url);
        self.landmark_model_url = overrides.landmark_model_url.or(self.landmark_model_url);
        self.validate()?;
        Ok(self)
    }

    /// True when the user pointed at specific model files, so a missing
    /// model is an error rather than a reason to run without detection.
    pub fn requires_models(&self) -> bool {
        self.detector_model.is_some() || self.landmark_model.is_some()
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(SettingsError::Confidence(self.confidence));
        }
        Ok(())
    }
}
