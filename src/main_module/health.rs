//! Liveness and backend latency checks

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

use crate::core::backend::BackendClient;
use crate::core::shared::state::AppState;

/// Relations probed by the latency check. All of them carry an `id` column.
pub const LATENCY_PROBE_RELATIONS: &[&str] =
    &["companies", "profiles", "employees", "projects", "tasks", "challenges"];

pub async fn health_check() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "service": "bizdash",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct LatencyCheck {
    pub relation: String,
    pub ok: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LatencyReport {
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
    pub elapsed_ms: u64,
    pub checks: Vec<LatencyCheck>,
    pub timestamp: String,
}

/// Pings every relation concurrently and tallies the results.
pub async fn run_latency_checks(backend: &BackendClient, relations: &[&str]) -> LatencyReport {
    let started = Instant::now();

    let checks: Vec<LatencyCheck> = join_all(relations.iter().map(|relation| async move {
        let result = backend.ping(relation).await;
        if let Err(e) = &result {
            warn!("Latency probe on {relation} failed: {e}");
        }
        LatencyCheck {
            relation: relation.to_string(),
            ok: result.is_ok(),
            error: result.err().map(|e| e.to_string()),
        }
    }))
    .await;

    let passed = checks.iter().filter(|c| c.ok).count();
    LatencyReport {
        passed,
        failed: checks.len() - passed,
        total: checks.len(),
        elapsed_ms: started.elapsed().as_millis() as u64,
        checks,
        timestamp: Utc::now().to_rfc3339(),
    }
}

pub async fn latency_check(State(state): State<Arc<AppState>>) -> Json<LatencyReport> {
    Json(run_latency_checks(&state.backend, LATENCY_PROBE_RELATIONS).await)
}
