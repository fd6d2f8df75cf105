//! HTTP server initialization and routing

use axum::http::{header, Method};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::{health_check, latency_check};
use crate::api_router::configure_api_routes;
use crate::core::shared::state::AppState;
use crate::core::urls::ApiUrls;

pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(ApiUrls::HEALTH, get(health_check))
        .route(ApiUrls::HEALTH_LATENCY, get(latency_check))
        .merge(configure_api_routes())
        .with_state(app_state)
        .layer(create_cors_layer())
        .layer(TraceLayer::new_for_http())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}

pub async fn run_axum_server(app_state: Arc<AppState>) -> std::io::Result<()> {
    let addr = app_state.config.server.bind_address();
    let app = build_router(app_state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {} - is another instance running?", addr, e);
            return Err(e);
        }
    };

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(std::io::Error::other)
}
