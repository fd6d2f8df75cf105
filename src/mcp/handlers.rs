use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use super::advisors::{list_advisors, AdvisorListing};
use super::tables::{list_tables, TableListing};
use crate::core::shared::state::AppState;
use crate::core::urls::ApiUrls;

pub fn configure_mcp_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(ApiUrls::TABLES, get(list_tables_handler))
        .route(ApiUrls::ADVISORS, get(list_advisors_handler))
}

async fn list_tables_handler(State(state): State<Arc<AppState>>) -> Json<TableListing> {
    Json(list_tables(state.tool.as_ref()).await)
}

async fn list_advisors_handler(State(state): State<Arc<AppState>>) -> Json<AdvisorListing> {
    Json(list_advisors(state.tool.as_ref()).await)
}
