use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use smilehard_core::detection::domain::landmark_layout::LandmarkLayout;
use smilehard_core::detection::domain::landmark_set::LandmarkSet;
use smilehard_core::leaderboard::domain::leaderboard::Leaderboard;
use smilehard_core::leaderboard::domain::leaderboard_entry::LeaderboardEntry;
use smilehard_core::pipeline::analyze_frame_use_case::AnalyzeFrameUseCase;
use smilehard_core::scoring::domain::smile_score::SmileScore;
use smilehard_core::scoring::domain::smile_scorer::SmileScorer;
use smilehard_core::shared::constants::ANONYMOUS_USERNAME;
use smilehard_core::shared::geometry::{ImageDimensions, Point2D};

use crate::api_error::ApiError;

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<AnalyzeFrameUseCase>,
    leaderboard: Arc<Leaderboard>,
}

impl AppState {
    pub fn new(analyzer: Arc<AnalyzeFrameUseCase>, leaderboard: Arc<Leaderboard>) -> Self {
        Self {
            analyzer,
            leaderboard,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreLandmarksRequest {
    landmarks: Vec<Point2D>,
    #[serde(default)]
    layout: LandmarkLayout,
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
pub struct SubmitScoreRequest {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    score: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    score: SmileScore,
    coins: u32,
}

impl From<SmileScore> for ScoreResponse {
    fn from(score: SmileScore) -> Self {
        Self {
            score,
            coins: score.coins(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    status: &'static str,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze))
        .route("/score", post(score_landmarks))
        .route("/leaderboard", get(get_leaderboard).post(submit_score))
        .layer(cors)
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let image = request.image.ok_or(ApiError::MissingImage)?;
    let analyzer = Arc::clone(&state.analyzer);

    // Decoding and inference are CPU-bound; keep them off the async workers.
    let analysis = tokio::task::spawn_blocking(move || analyzer.execute_data_url(&image))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::InvalidImage)?;

    log::debug!(
        "Analyzed frame: score={} face_detected={}",
        analysis.score,
        analysis.face_detected
    );
    Ok(Json(ScoreResponse::from(analysis.score)))
}

async fn score_landmarks(
    State(state): State<AppState>,
    Json(request): Json<ScoreLandmarksRequest>,
) -> Json<ScoreResponse> {
    let scorer = match request.layout {
        LandmarkLayout::FaceMesh468 => state.analyzer.scorer().clone(),
        layout => SmileScorer::new(layout.default_calibration()),
    };
    let landmarks = LandmarkSet::new(request.landmarks, request.layout);
    let dims = ImageDimensions::new(request.width, request.height);
    let score = scorer.score(&landmarks, dims);
    log::debug!("Scored {} {:?} landmarks: {score}", landmarks.len(), request.layout);
    Json(ScoreResponse::from(score))
}

async fn get_leaderboard(State(state): State<AppState>) -> Json<Vec<LeaderboardEntry>> {
    Json(state.leaderboard.top())
}

async fn submit_score(
    State(state): State<AppState>,
    Json(request): Json<SubmitScoreRequest>,
) -> Json<StatusResponse> {
    let entry = LeaderboardEntry::new(
        request
            .username
            .unwrap_or_else(|| ANONYMOUS_USERNAME.to_string()),
        request.score.unwrap_or(0),
    );
    log::info!("Leaderboard submission: {} {}", entry.username, entry.score);
    state.leaderboard.submit(entry);
    Json(StatusResponse { status: "success" })
}
