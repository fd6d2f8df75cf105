use crate::core::backend::BackendClient;
use crate::core::config::{AppConfig, BackendConfig, ServerConfig, ToolConfig};
use crate::core::shared::state::AppState;
use crate::mcp::{ExternalTool, ExternalToolError, ToolOutput};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockBehavior {
    Succeed(ToolOutput),
    ExitWith(i32),
}

/// Records every invocation and answers with a fixed behavior.
#[derive(Debug)]
pub struct MockTool {
    behavior: MockBehavior,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockTool {
    pub fn succeeding(value: Value) -> Self {
        Self::new(MockBehavior::Succeed(ToolOutput::Json(value)))
    }

    pub fn printing(text: &str) -> Self {
        Self::new(MockBehavior::Succeed(ToolOutput::Raw(text.to_string())))
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::ExitWith(1))
    }

    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ExternalTool for MockTool {
    async fn invoke(
        &self,
        operation: &str,
        input: &Value,
    ) -> Result<ToolOutput, ExternalToolError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((operation.to_string(), input.clone()));
        }
        match &self.behavior {
            MockBehavior::Succeed(output) => Ok(output.clone()),
            MockBehavior::ExitWith(code) => Err(ExternalToolError::NonZeroExit {
                code: Some(*code),
                stderr: "mock failure".to_string(),
            }),
        }
    }
}

pub fn test_config(backend_url: &str) -> AppConfig {
    AppConfig {
        backend: BackendConfig {
            url: backend_url.to_string(),
            anon_key: "test-anon-key".to_string(),
            project_ref: "test-project".to_string(),
        },
        tool: ToolConfig {
            bin: "mcp".to_string(),
            server: "supabase".to_string(),
            access_token: None,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database_url: None,
    }
}

pub struct TestAppStateBuilder {
    backend_url: String,
    tool: Option<Arc<dyn ExternalTool>>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            backend_url: "http://127.0.0.1:9".to_string(),
            tool: None,
        }
    }

    pub fn with_backend_url(mut self, url: &str) -> Self {
        self.backend_url = url.to_string();
        self
    }

    pub fn with_tool(mut self, tool: Arc<dyn ExternalTool>) -> Self {
        self.tool = Some(tool);
        self
    }

    pub fn build(self) -> Arc<AppState> {
        let config = test_config(&self.backend_url);
        let backend = BackendClient::new(&config.backend).expect("test backend client");
        let tool = self
            .tool
            .unwrap_or_else(|| Arc::new(MockTool::failing()) as Arc<dyn ExternalTool>);

        Arc::new(AppState::new(config, backend, tool))
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
