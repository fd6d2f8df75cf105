use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::error::ExternalToolError;
use crate::core::config::ToolConfig;
use crate::security::command_guard::SafeCommand;

const SUBCOMMAND: &str = "call";
const MAX_STDERR_IN_ERROR: usize = 2048;

/// What a tool printed on stdout.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Json(Value),
    /// Stdout that is not JSON, kept verbatim for diagnostics.
    Raw(String),
}

impl ToolOutput {
    /// Parses stdout, unwrapping the MCP `{"content": [{"type": "text", "text": ...}]}`
    /// envelope when present. A result flagged `"isError": true` is a failure
    /// even though the tool exited cleanly.
    pub fn from_stdout(stdout: &str) -> Result<Self, ExternalToolError> {
        let trimmed = stdout.trim();
        let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
            return Ok(Self::Raw(stdout.to_string()));
        };

        if value.get("isError").and_then(Value::as_bool) == Some(true) {
            let message = single_text_content(&value).unwrap_or(trimmed);
            return Err(ExternalToolError::MalformedOutput(truncate(message, 256)));
        }

        if let Some(text) = single_text_content(&value) {
            return Ok(match serde_json::from_str::<Value>(text.trim()) {
                Ok(inner) => Self::Json(inner),
                Err(_) => Self::Raw(text.to_string()),
            });
        }

        Ok(Self::Json(value))
    }

    pub fn into_json(self) -> Result<Value, ExternalToolError> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Raw(text) => Err(ExternalToolError::MalformedOutput(truncate(&text, 256))),
        }
    }
}

fn single_text_content(value: &Value) -> Option<&str> {
    let items = value.get("content")?.as_array()?;
    match items.as_slice() {
        [item] if item.get("type").and_then(Value::as_str) == Some("text") => {
            item.get("text").and_then(Value::as_str)
        }
        _ => None,
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// An operation exposed by the external MCP server.
#[async_trait]
pub trait ExternalTool: Send + Sync {
    async fn invoke(&self, operation: &str, input: &Value) -> Result<ToolOutput, ExternalToolError>;
}

/// Runs `<bin> call <server> <operation>` with the JSON input on stdin.
#[derive(Debug, Clone)]
pub struct CliTool {
    bin: String,
    server: String,
    access_token: Option<String>,
    project_ref: String,
}

impl CliTool {
    pub fn new(config: &ToolConfig, project_ref: &str) -> Self {
        Self {
            bin: config.bin.clone(),
            server: config.server.clone(),
            access_token: config.access_token.clone(),
            project_ref: project_ref.to_string(),
        }
    }

    pub fn command(
        &self,
        operation: &str,
        input: &Value,
    ) -> Result<SafeCommand, ExternalToolError> {
        let payload =
            serde_json::to_vec(input).map_err(|e| ExternalToolError::Encode(e.to_string()))?;

        let mut cmd = SafeCommand::new(&self.bin)?
            .args(&[SUBCOMMAND, self.server.as_str(), operation])?
            .env("MCP_PROJECT_REF", &self.project_ref)?;

        if let Some(token) = &self.access_token {
            cmd = cmd.env("MCP_ACCESS_TOKEN", token)?;
        }

        Ok(cmd.stdin_payload(payload)?)
    }
}

#[async_trait]
impl ExternalTool for CliTool {
    async fn invoke(
        &self,
        operation: &str,
        input: &Value,
    ) -> Result<ToolOutput, ExternalToolError> {
        let cmd = self.command(operation, input)?;
        debug!("Invoking {} {:?}", cmd.program(), cmd.get_args());

        let output = cmd.execute_async().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExternalToolError::NonZeroExit {
                code: output.status.code(),
                stderr: truncate(stderr.trim(), MAX_STDERR_IN_ERROR),
            });
        }

        ToolOutput::from_stdout(&String::from_utf8_lossy(&output.stdout))
    }
}
