use crate::security::command_guard::CommandGuardError;

/// Failure of an external tool call. Never reaches the HTTP caller: the
/// fallback responder turns it into a simulated payload.
#[derive(Debug, thiserror::Error)]
pub enum ExternalToolError {
    #[error("Tool invocation rejected or failed to start: {0}")]
    Guard(#[from] CommandGuardError),
    #[error("Tool exited with status {code:?}: {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },
    #[error("Failed to encode tool input: {0}")]
    Encode(String),
    #[error("Tool produced malformed output: {0}")]
    MalformedOutput(String),
}
