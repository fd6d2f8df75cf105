use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::client::{ExternalTool, ToolOutput};
use super::error::ExternalToolError;

/// Which path produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    McpTool,
    Simulated,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::McpTool => "mcp_tool",
            Self::Simulated => "simulated",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub payload: T,
    pub method: Method,
    pub generated_at: DateTime<Utc>,
}

impl<T> Outcome<T> {
    pub fn is_simulated(&self) -> bool {
        self.method == Method::Simulated
    }

    pub fn timestamp(&self) -> String {
        self.generated_at.to_rfc3339()
    }
}

/// Calls the tool once and parses its output; any failure along the way is
/// logged and replaced by `simulate()`. There is no retry.
pub async fn call_with_fallback<T>(
    tool: &dyn ExternalTool,
    operation: &str,
    input: &Value,
    parse: impl FnOnce(ToolOutput) -> Result<T, ExternalToolError>,
    simulate: impl FnOnce() -> T,
) -> Outcome<T> {
    let attempt = match tool.invoke(operation, input).await {
        Ok(output) => parse(output),
        Err(e) => Err(e),
    };

    match attempt {
        Ok(payload) => {
            info!("{operation} served by external tool");
            Outcome {
                payload,
                method: Method::McpTool,
                generated_at: Utc::now(),
            }
        }
        Err(e) => {
            warn!("{operation} failed, serving simulated response: {e}");
            Outcome {
                payload: simulate(),
                method: Method::Simulated,
                generated_at: Utc::now(),
            }
        }
    }
}
