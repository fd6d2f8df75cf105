use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;
use tracing::debug;

use crate::core::backend::{BackendClient, BackendError};
use crate::core::shared::error::ApiError;
use crate::core::shared::state::AppState;
use crate::core::urls::ApiUrls;
use crate::datamodel::{
    EmployeeWithProfile, GamificationRank, ProjectStatistics, EMPLOYEES_WITH_PROFILE,
    GAMIFICATION_RANKING, PROJECT_STATISTICS,
};

pub fn configure_dashboard_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(ApiUrls::DASHBOARD_EMPLOYEES, get(employees_handler))
        .route(
            ApiUrls::DASHBOARD_PROJECT_STATISTICS,
            get(project_statistics_handler),
        )
        .route(ApiUrls::DASHBOARD_RANKING, get(ranking_handler))
}

pub async fn fetch_employees(
    backend: &BackendClient,
) -> Result<Vec<EmployeeWithProfile>, BackendError> {
    backend.select_all(EMPLOYEES_WITH_PROFILE.name).await
}

pub async fn fetch_project_statistics(
    backend: &BackendClient,
) -> Result<Vec<ProjectStatistics>, BackendError> {
    backend.select_all(PROJECT_STATISTICS.name).await
}

/// Ranking rows ordered by rank; the REST surface does not guarantee order.
pub async fn fetch_ranking(backend: &BackendClient) -> Result<Vec<GamificationRank>, BackendError> {
    let mut rows: Vec<GamificationRank> = backend.select_all(GAMIFICATION_RANKING.name).await?;
    rows.sort_by_key(|r| r.rank);
    Ok(rows)
}

async fn employees_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EmployeeWithProfile>>, ApiError> {
    let rows = fetch_employees(&state.backend).await?;
    debug!("Loaded {} employees", rows.len());
    Ok(Json(rows))
}

async fn project_statistics_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProjectStatistics>>, ApiError> {
    Ok(Json(fetch_project_statistics(&state.backend).await?))
}

async fn ranking_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GamificationRank>>, ApiError> {
    Ok(Json(fetch_ranking(&state.backend).await?))
}
