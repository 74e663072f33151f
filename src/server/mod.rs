//! HTTP surface of the forecast service.
//!
//! Uses axum on tokio for the serving shell only: every handler is a thin
//! wrapper over the pure, synchronous prediction pipeline, so request
//! concurrency is entirely delegated to the framework. Artifacts are loaded
//! once at startup, before the listener accepts connections — handlers only
//! ever read the process-wide cache.
//!
//! Routes:
//!   GET  /                     HTML form page
//!   POST /api/predict          run one prediction
//!   GET  /api/fields/:variant  field metadata for a variant

pub mod page;

use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::alert::banding;
use crate::config::ServerConfig;
use crate::logging::{self, Component};
use crate::model::PipelineVariant;
use crate::pipeline::ArtifactSet;
use crate::stations;

// ============================================================================
// Application State
// ============================================================================

/// Shared handler state. The artifact set lives in the process-wide cache,
/// so the state is a copyable reference.
#[derive(Clone, Copy)]
pub struct AppState {
    artifacts: &'static ArtifactSet,
}

impl AppState {
    pub fn new(artifacts: &'static ArtifactSet) -> AppState {
        AppState { artifacts }
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Variant identifier: "full" or "rain_only".
    pub variant: String,
    /// Feature values in the field-registry order of the variant.
    pub features: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub variant: String,
    /// Raw model output, in `unit`.
    pub predicted: f64,
    pub unit: String,
    /// The same value normalized to centimeters.
    pub predicted_cm: f64,
    pub condition: String,
    pub message: String,
    pub gauge_percent: f64,
}

#[derive(Debug, Serialize)]
pub struct FieldMetadata {
    pub id: String,
    pub label: String,
    pub unit: String,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

#[derive(Debug, Serialize)]
pub struct FieldsResponse {
    pub variant: String,
    pub fields: Vec<FieldMetadata>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// A rejected request: plain message, no partial results.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn unprocessable(message: String) -> ApiError {
        ApiError {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn index() -> Html<String> {
    Html(page::render_index())
}

async fn fields(UrlPath(variant_id): UrlPath<String>) -> Result<Json<FieldsResponse>, ApiError> {
    let variant = parse_variant(&variant_id)?;
    let fields = stations::fields_for(variant)
        .iter()
        .map(|f| FieldMetadata {
            id: f.id.to_string(),
            label: f.label.to_string(),
            unit: f.unit.to_string(),
            min: f.min,
            max: f.max,
            default: f.default,
            step: f.step,
        })
        .collect();
    Ok(Json(FieldsResponse {
        variant: variant.id().to_string(),
        fields,
    }))
}

async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let variant = parse_variant(&request.variant)?;
    let pipeline = state.artifacts.pipeline(variant);

    let forecast = pipeline.forecast(&request.features).map_err(|e| {
        logging::log_predict_rejection(variant.id(), &e);
        ApiError::unprocessable(e.to_string())
    })?;

    // Out-of-declared-range values are accepted (the range is advisory),
    // but leave a trace for operators.
    for (field, value) in stations::fields_for(variant).iter().zip(&request.features) {
        if !stations::in_declared_range(field, *value) {
            logging::log_out_of_range(variant.id(), field.id, *value);
        }
    }

    let condition = banding::classify(forecast.predicted_cm);
    logging::debug(
        Component::Predict,
        Some(variant.id()),
        &format!(
            "{:?} -> {:.1} cm ({})",
            request.features, forecast.predicted_cm, condition
        ),
    );

    Ok(Json(PredictResponse {
        variant: variant.id().to_string(),
        predicted: forecast.predicted,
        unit: variant.output_unit().symbol().to_string(),
        predicted_cm: forecast.predicted_cm,
        condition: condition.id().to_string(),
        message: condition.message().to_string(),
        gauge_percent: banding::gauge_percent(forecast.predicted_cm),
    }))
}

fn parse_variant(id: &str) -> Result<PipelineVariant, ApiError> {
    PipelineVariant::from_id(id)
        .ok_or_else(|| ApiError::unprocessable(format!("unknown pipeline variant '{}'", id)))
}

// ============================================================================
// Router & Runner
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/predict", post(predict))
        .route("/api/fields/:variant", get(fields))
        .with_state(state)
}

/// Binds the listener and serves until the process is stopped.
pub async fn run_server(
    config: &ServerConfig,
    artifacts: &'static ArtifactSet,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        logging::error(
            Component::Http,
            None,
            &format!("cannot bind {}: {}", addr, e),
        );
        e
    })?;

    logging::info(
        Component::Http,
        None,
        &format!("listening on http://{}", addr),
    );

    axum::serve(listener, router(AppState::new(artifacts)).into_make_service()).await?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
