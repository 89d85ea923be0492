//! Offer Response API Server
//!
//! REST surface over the cleaning pipeline and the offer-response
//! classifier: single predictions, profile predictions, and CSV batch
//! uploads.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use inference_engine::Classifier;
use record_validator::RecordValidator;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
mod error;
pub mod rate_limit;
mod routes;

pub use config::ApiConfig;
pub use error::ApiError;

/// Application state shared across handlers.
///
/// The classifier is loaded once at startup and read-only thereafter, so
/// handlers borrow it without locking.
pub struct AppState {
    /// The loaded offer-response classifier
    pub classifier: Classifier,
    /// Record plausibility checks
    pub validator: RecordValidator,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state around a loaded classifier
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            validator: RecordValidator::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub classifier: ClassifierInfo,
}

/// Loaded-classifier component info
#[derive(Debug, Serialize)]
pub struct ClassifierInfo {
    pub artifact: String,
    pub model: String,
    pub trees: usize,
}

/// Create the application router
pub fn create_router(
    state: Arc<AppState>,
    rate_limit: &rate_limit::RateLimitConfig,
) -> Router {
    let governor_config = rate_limit::create_governor_config(rate_limit);

    let predictions = Router::new()
        .route("/api/v1/predict", post(routes::predict::predict))
        .route(
            "/api/v1/predict/profile",
            post(routes::predict::predict_profile),
        )
        .route("/api/v1/batch/predict", post(routes::batch::predict_batch))
        .layer(GovernorLayer {
            config: governor_config,
        });

    Router::new()
        .route("/api/v1/health", get(health_handler))
        .merge(predictions)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        classifier: ClassifierInfo {
            artifact: state.classifier.artifact_path().display().to_string(),
            model: state.classifier.model_name().to_string(),
            trees: state.classifier.tree_count(),
        },
    };

    Json(response)
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Load the classifier and run the server.
///
/// A missing or unreadable artifact is fatal here; no prediction is
/// possible without it.
pub async fn run_server(config: ApiConfig) -> anyhow::Result<()> {
    let classifier = Classifier::load_latest(&config.artifact_dir, &config.artifact_prefix)?;
    let state = Arc::new(AppState::new(classifier));
    let app = create_router(state, &config.rate_limit);

    info!("Starting API server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ARTIFACT: &str =
        r#"{"name": "offer-response-v1", "trees": [{"nodes": [{"kind": "leaf", "label": 1}]}]}"#;

    #[test]
    fn test_state_and_router_construction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model_2014-06-30.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(ARTIFACT.as_bytes()).unwrap();

        let classifier = Classifier::load(&path).unwrap();
        let state = Arc::new(AppState::new(classifier));
        assert_eq!(state.classifier.tree_count(), 1);
        assert_eq!(state.classifier.model_name(), "offer-response-v1");

        let _router = create_router(state, &rate_limit::RateLimitConfig::default());
    }
}
