use crate::core::backend::BackendClient;
use crate::core::config::AppConfig;
use crate::mcp::ExternalTool;
use std::sync::Arc;

/// Shared, immutable request context. Built once in `main`.
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub backend: BackendClient,
    pub tool: Arc<dyn ExternalTool>,
}

impl AppState {
    pub fn new(config: AppConfig, backend: BackendClient, tool: Arc<dyn ExternalTool>) -> Self {
        Self {
            config: Arc::new(config),
            backend,
            tool,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("project_ref", &self.config.backend.project_ref)
            .field("backend", &self.backend.base_url())
            .finish_non_exhaustive()
    }
}
