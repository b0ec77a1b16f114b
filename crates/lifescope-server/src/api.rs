use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use protocol::api::{HistoryQuery, HistoryResponse, SubmitResponse};
use protocol::AssessmentSubmission;
use risk_engine::RiskScorer;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::CorsConfig;
use crate::store::AssessmentStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) scorer: RiskScorer,
    pub(crate) store: Arc<AssessmentStore>,
    pub(crate) history_limit: usize,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

pub(crate) fn build_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/api/assessment/submit", post(submit_assessment))
        .route("/api/assessments/history", get(assessment_history))
        .with_state(state)
        .layer(cors_layer(&cors.allowed_origins))
        .layer(middleware::from_fn(log_http_request))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to LifeScope API".to_string(),
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

pub(crate) async fn submit_assessment(
    State(state): State<AppState>,
    Json(submission): Json<AssessmentSubmission>,
) -> Result<Json<SubmitResponse>, StatusCode> {
    let risk_results = state.scorer.score(&submission.answers);
    let record = state
        .store
        .insert(submission.user_id, submission.answers, risk_results)
        .await
        .map_err(|err| {
            tracing::error!(error = %format!("{err:#}"), "failed to persist assessment");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    tracing::info!(
        assessment_id = record.id,
        user_id = ?record.user_id,
        heart_score = record.risk_results.heart.score,
        diabetes_score = record.risk_results.diabetes.score,
        kidney_score = record.risk_results.kidney.score,
        obesity_score = record.risk_results.obesity.score,
        "assessment saved"
    );
    Ok(Json(SubmitResponse {
        message: "Assessment received and saved".to_string(),
        assessment_id: record.id,
        created_at: record.created_at(),
        risk_results: record.risk_results,
    }))
}

pub(crate) async fn assessment_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let entries = state.store.history(query.owner(), state.history_limit).await;
    tracing::debug!(
        user_id = ?query.owner(),
        count = entries.len(),
        "history served"
    );
    Json(HistoryResponse::new(entries))
}

async fn log_http_request(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let origin = req
        .headers()
        .get("origin")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let response = next.run(req).await;
    let status = response.status();
    tracing::info!(
        method = %method,
        uri = %uri,
        origin = %origin,
        status = %status,
        "http request"
    );
    response
}
