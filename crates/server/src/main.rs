mod api_error;
mod app;
mod settings;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;

use smilehard_core::detection::domain::landmark_provider::LandmarkProvider;
use smilehard_core::detection::infrastructure::fixed_landmark_provider::FixedLandmarkProvider;
use smilehard_core::detection::infrastructure::model_resolver::{self, ModelSource};
use smilehard_core::detection::infrastructure::onnx_face_mesh_provider::OnnxFaceMeshProvider;
use smilehard_core::leaderboard::domain::leaderboard::Leaderboard;
use smilehard_core::pipeline::analyze_frame_use_case::AnalyzeFrameUseCase;
use smilehard_core::scoring::domain::smile_scorer::SmileScorer;
use smilehard_core::shared::constants::{FACE_DETECTOR_MODEL_NAME, FACE_LANDMARK_MODEL_NAME};

use crate::app::{build_router, AppState};
use crate::settings::{ServerSettings, SettingsOverrides};

/// Webcam smile-scoring game server.
#[derive(Parser)]
#[command(name = "smilehard")]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to listen on.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Smile ratio that scores 0.
    #[arg(long)]
    min_ratio: Option<f64>,

    /// Smile ratio that scores 100.
    #[arg(long)]
    max_ratio: Option<f64>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long)]
    confidence: Option<f64>,

    /// Face detector ONNX model (BlazeFace short range).
    #[arg(long)]
    detector_model: Option<PathBuf>,

    /// Face landmark ONNX model (468-point mesh).
    #[arg(long)]
    landmark_model: Option<PathBuf>,

    /// Directory searched for models not found in the cache.
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Where to download the detector model if it is not found locally.
    #[arg(long)]
    detector_model_url: Option<String>,

    /// Where to download the landmark model if it is not found locally.
    #[arg(long)]
    landmark_model_url: Option<String>,

    /// JSON settings file; command-line flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            host: self.host.clone(),
            port: self.port,
            min_ratio: self.min_ratio,
            max_ratio: self.max_ratio,
            confidence: self.confidence,
            detector_model: self.detector_model.clone(),
            landmark_model: self.landmark_model.clone(),
            models_dir: self.models_dir.clone(),
            detector_model_url: self.detector_model_url.clone(),
            landmark_model_url: self.landmark_model_url.clone(),
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    // Model downloads use a blocking HTTP client, which must not run
    // inside the async runtime.
    let provider = build_provider(&settings)?;
    let scorer = SmileScorer::new(settings.calibration);
    log::info!(
        "Calibration: min_ratio={} max_ratio={}",
        settings.calibration.min_ratio(),
        settings.calibration.max_ratio()
    );

    let state = AppState::new(
        Arc::new(AnalyzeFrameUseCase::new(provider, scorer)),
        Arc::new(Leaderboard::with_demo_entries()),
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(state, &settings.host, settings.port))
}

async fn serve(state: AppState, host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

fn load_settings(cli: &Cli) -> Result<ServerSettings, Box<dyn std::error::Error>> {
    let file = match &cli.config {
        Some(path) => {
            log::info!("Loading settings from {}", path.display());
            ServerSettings::load(path)?
        }
        None => ServerSettings::default(),
    };
    Ok(file.apply(cli.overrides())?)
}

/// The ONNX provider when both models resolve. Without explicit model
/// paths, a missing model downgrades to a provider that never sees a face.
fn build_provider(
    settings: &ServerSettings,
) -> Result<Box<dyn LandmarkProvider>, Box<dyn std::error::Error>> {
    match build_onnx_provider(settings) {
        Ok(provider) => Ok(provider),
        Err(e) if settings.requires_models() => Err(e),
        Err(e) => {
            log::warn!("Face models unavailable ({e}); every frame will score 0");
            Ok(Box::new(FixedLandmarkProvider::no_face()))
        }
    }
}

fn build_onnx_provider(
    settings: &ServerSettings,
) -> Result<Box<dyn LandmarkProvider>, Box<dyn std::error::Error>> {
    let detector_source = ModelSource {
        name: FACE_DETECTOR_MODEL_NAME.to_string(),
        explicit_path: settings.detector_model.clone(),
        bundled_dir: settings.models_dir.clone(),
        url: settings.detector_model_url.clone(),
    };
    let landmark_source = ModelSource {
        name: FACE_LANDMARK_MODEL_NAME.to_string(),
        explicit_path: settings.landmark_model.clone(),
        bundled_dir: settings.models_dir.clone(),
        url: settings.landmark_model_url.clone(),
    };

    log::info!("Resolving model: {FACE_DETECTOR_MODEL_NAME}");
    let detector_path = model_resolver::resolve(&detector_source, Some(Box::new(download_progress)))?;
    log::info!("Resolving model: {FACE_LANDMARK_MODEL_NAME}");
    let landmark_path = model_resolver::resolve(&landmark_source, Some(Box::new(download_progress)))?;

    let provider = OnnxFaceMeshProvider::new(&detector_path, &landmark_path, settings.confidence)?;
    log::info!(
        "Face mesh provider ready (detector {}, landmarks {})",
        detector_path.display(),
        landmark_path.display()
    );
    Ok(Box::new(provider))
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading model... {pct}%");
    } else {
        eprint!("\rDownloading model... {downloaded} bytes");
    }
}
