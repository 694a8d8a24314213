//! Route table and request handlers.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use super::templates;
use super::AppState;
use crate::models::{MissionStats, RecordSummary};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/api/scheduler", get(run_scheduler).post(run_scheduler))
        .route("/api/status", get(status))
        .route("/api/current", get(current))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Trigger one ingest run. GET and POST behave identically so both cron
/// services and manual invocations work.
async fn run_scheduler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let started = Instant::now();

    match state.ingest.run().await {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": format!(
                    "Successfully processed {} records in {}ms",
                    report.record_count, report.duration_ms
                ),
                "timestamp": report.captured_at.to_rfc3339(),
                "duration_ms": report.duration_ms,
                "record_count": report.record_count,
            })),
        ),
        Err(err) => {
            tracing::error!(error = %err, "scheduled ingest failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": err.to_string(),
                    "timestamp": Utc::now().to_rfc3339(),
                    "duration_ms": started.elapsed().as_millis() as u64,
                })),
            )
        }
    }
}

/// Read-only pipeline health: the most recent persisted rows and how long
/// ago the newest snapshot was captured.
async fn status(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.snapshot_repo.latest_records(5).await {
        Ok(records) => {
            let now = Utc::now();
            let hours_since = records
                .first()
                .map(|record| (now - record.captured_at).num_hours());
            let healthy = hours_since.is_some_and(|h| h < state.freshness_threshold_hours);
            let summaries: Vec<RecordSummary> =
                records.iter().map(RecordSummary::from).collect();

            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "status": if healthy { "healthy" } else { "stale" },
                    "hours_since_last_snapshot": hours_since,
                    "freshness_threshold_hours": state.freshness_threshold_hours,
                    "last_records": summaries,
                })),
            )
        }
        Err(err) => {
            tracing::error!(error = %err, "status query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": err.to_string() })),
            )
        }
    }
}

/// Fetch and extract the live table without persisting anything.
async fn current(
    State(state): State<AppState>,
) -> Result<Json<Vec<MissionStats>>, (StatusCode, Json<Value>)> {
    match state.ingest.fetch_current().await {
        Ok(records) => Ok(Json(records)),
        Err(err) => {
            tracing::error!(error = %err, "live fetch failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(json!({ "success": false, "error": err.to_string() })),
            ))
        }
    }
}

/// HTML dashboard over the latest persisted snapshot.
async fn dashboard(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let batch = state.snapshot_repo.latest_batch().await.map_err(|err| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(templates::error_page(&err.to_string())),
        )
    })?;

    let captured_at = batch.first().map(|record| record.captured_at);
    let stale = match captured_at {
        Some(at) => (Utc::now() - at).num_hours() >= state.freshness_threshold_hours,
        None => true,
    };
    Ok(Html(templates::dashboard_page(&batch, captured_at, stale)))
}
