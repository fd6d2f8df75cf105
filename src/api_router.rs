//! API router
//!
//! Combines the routes of every feature module. Health routes are added by
//! the server itself.

use axum::Router;
use std::sync::Arc;

use crate::core::shared::state::AppState;

pub fn configure_api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(crate::migrations::configure_migration_routes())
        .merge(crate::mcp::configure_mcp_routes())
        .merge(crate::dashboard::configure_dashboard_routes())
}
