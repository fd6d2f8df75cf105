use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tracing::warn;

use super::service::apply_migration;
use super::types::{MigrationRequest, MigrationResponse};
use crate::core::shared::error::ApiError;
use crate::core::shared::state::AppState;
use crate::core::urls::ApiUrls;

pub fn configure_migration_routes() -> Router<Arc<AppState>> {
    Router::new().route(ApiUrls::MIGRATIONS, post(apply_migration_handler))
}

async fn apply_migration_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MigrationRequest>, JsonRejection>,
) -> Result<Json<MigrationResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::Internal(e.body_text()))?;

    let migration = request.validate().inspect_err(|e| warn!("Rejected migration: {e}"))?;

    Ok(Json(apply_migration(state.tool.as_ref(), migration).await))
}
