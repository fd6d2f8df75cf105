use std::collections::HashMap;
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::sync::LazyLock;

use tokio::io::AsyncWriteExt;

static FORBIDDEN_SHELL_CHARS: LazyLock<HashSet<char>> = LazyLock::new(|| {
    HashSet::from([
        ';', '|', '&', '$', '`', '(', ')', '{', '}', '<', '>', '\n', '\r', '\0',
    ])
});

const MAX_ARGUMENT_LEN: usize = 4096;
const MAX_STDIN_PAYLOAD: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandGuardError {
    InvalidProgram(String),
    InvalidArgument(String),
    ExecutionFailed(String),
    ShellInjectionAttempt(String),
}

impl std::fmt::Display for CommandGuardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProgram(cmd) => write!(f, "Invalid program name: {cmd}"),
            Self::InvalidArgument(arg) => write!(f, "Invalid argument: {arg}"),
            Self::ExecutionFailed(msg) => write!(f, "Command execution failed: {msg}"),
            Self::ShellInjectionAttempt(input) => {
                write!(f, "Shell injection attempt detected: {input}")
            }
        }
    }
}

impl std::error::Error for CommandGuardError {}

/// A child process built from a program and a validated argument list.
///
/// Nothing is ever passed through a shell. Structured input goes to the
/// child's stdin instead of being interpolated into the command line.
#[derive(Debug, Clone)]
pub struct SafeCommand {
    program: String,
    args: Vec<String>,
    envs: HashMap<String, String>,
    stdin: Option<Vec<u8>>,
}

impl SafeCommand {
    pub fn new(program: &str) -> Result<Self, CommandGuardError> {
        validate_program(program)?;

        Ok(Self {
            program: program.to_string(),
            args: Vec::new(),
            envs: HashMap::new(),
            stdin: None,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn args(mut self, args: &[&str]) -> Result<Self, CommandGuardError> {
        for arg in args {
            validate_argument(arg)?;
            self.args.push((*arg).to_string());
        }
        Ok(self)
    }

    pub fn env(mut self, key: &str, value: &str) -> Result<Self, CommandGuardError> {
        validate_argument(key)?;
        validate_argument(value)?;
        self.envs.insert(key.to_string(), value.to_string());
        Ok(self)
    }

    /// Bytes written to the child's stdin before it is closed.
    pub fn stdin_payload(mut self, payload: Vec<u8>) -> Result<Self, CommandGuardError> {
        if payload.len() > MAX_STDIN_PAYLOAD {
            return Err(CommandGuardError::InvalidArgument(
                "Stdin payload too large".to_string(),
            ));
        }
        self.stdin = Some(payload);
        Ok(self)
    }

    fn build(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);

        cmd.env_clear();
        cmd.env("PATH", "/usr/local/bin:/usr/bin:/bin");
        cmd.env(
            "HOME",
            std::env::var_os("HOME").map_or_else(|| PathBuf::from("/tmp"), PathBuf::from),
        );
        cmd.env("LANG", "C.UTF-8");

        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        cmd.stdin(if self.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);
        cmd
    }

    /// Runs the child to completion. Stdin is fed while stdout and stderr are
    /// drained, so a child that echoes its input cannot fill a pipe and stall.
    pub async fn execute_async(&self) -> Result<Output, CommandGuardError> {
        let mut child = self
            .build()
            .spawn()
            .map_err(|e| CommandGuardError::ExecutionFailed(e.to_string()))?;

        let stdin = child.stdin.take();
        let feed = async {
            let (Some(payload), Some(mut stdin)) = (&self.stdin, stdin) else {
                return Ok::<(), std::io::Error>(());
            };
            stdin.write_all(payload).await?;
            stdin.shutdown().await
        };

        let (written, output) = tokio::join!(feed, child.wait_with_output());

        // A child that exits without reading stdin yields a broken pipe;
        // its exit status is what matters.
        if let Err(e) = written {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(CommandGuardError::ExecutionFailed(e.to_string()));
            }
        }

        output.map_err(|e| CommandGuardError::ExecutionFailed(e.to_string()))
    }
}

pub fn validate_program(program: &str) -> Result<(), CommandGuardError> {
    let name = std::path::Path::new(program)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    if name.is_empty() || (program != name && !program.starts_with('/')) {
        return Err(CommandGuardError::InvalidProgram(program.to_string()));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(CommandGuardError::InvalidProgram(program.to_string()));
    }

    if program.contains("..") {
        return Err(CommandGuardError::InvalidProgram(program.to_string()));
    }

    Ok(())
}

pub fn validate_argument(arg: &str) -> Result<(), CommandGuardError> {
    if arg.is_empty() {
        return Err(CommandGuardError::InvalidArgument(
            "Empty argument".to_string(),
        ));
    }

    if arg.len() > MAX_ARGUMENT_LEN {
        return Err(CommandGuardError::InvalidArgument(
            "Argument too long".to_string(),
        ));
    }

    let is_url = arg.starts_with("http://") || arg.starts_with("https://");

    for c in arg.chars() {
        if FORBIDDEN_SHELL_CHARS.contains(&c) {
            if is_url && c == '&' {
                continue;
            }
            return Err(CommandGuardError::ShellInjectionAttempt(format!(
                "Forbidden character '{}' in argument",
                c.escape_default()
            )));
        }
    }

    let dangerous_patterns = ["$(", "`", "&&", "||", ">>", "<<", "..", "//", "\\\\"];

    for pattern in dangerous_patterns {
        if arg.contains(pattern) {
            if is_url && pattern == "//" {
                continue;
            }
            return Err(CommandGuardError::ShellInjectionAttempt(format!(
                "Dangerous pattern '{}' detected",
                pattern
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_argument_valid() {
        assert!(validate_argument("call").is_ok());
        assert!(validate_argument("supabase").is_ok());
        assert!(validate_argument("apply_migration").is_ok());
        assert!(validate_argument("--format=json").is_ok());
        assert!(validate_argument("https://example.supabase.co").is_ok());
    }

    #[test]
    fn test_validate_argument_invalid() {
        assert!(validate_argument("hello; rm -rf /").is_err());
        assert!(validate_argument("$(whoami)").is_err());
        assert!(validate_argument("file | cat").is_err());
        assert!(validate_argument("test && echo").is_err());
        assert!(validate_argument("`id`").is_err());
        assert!(validate_argument("../../etc/passwd").is_err());
        assert!(validate_argument("").is_err());
    }

    #[test]
    fn test_validate_program() {
        assert!(validate_program("mcp").is_ok());
        assert!(validate_program("mcp-cli").is_ok());
        assert!(validate_program("/usr/local/bin/mcp").is_ok());
        assert!(validate_program("").is_err());
        assert!(validate_program("bin/mcp").is_err());
        assert!(validate_program("mcp;ls").is_err());
        assert!(validate_program("/opt/../bin/sh").is_err());
    }

    #[test]
    fn test_stdin_payload_limit() {
        let cmd = SafeCommand::new("cat").unwrap();
        assert!(cmd.clone().stdin_payload(vec![b'x'; 16]).is_ok());
        assert!(cmd.stdin_payload(vec![b'x'; MAX_STDIN_PAYLOAD + 1]).is_err());
    }

    #[tokio::test]
    async fn test_execute_pipes_stdin() {
        let output = SafeCommand::new("cat")
            .unwrap()
            .stdin_payload(b"{\"ok\":true}".to_vec())
            .unwrap()
            .execute_async()
            .await
            .unwrap();

        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_execute_streams_large_payload() {
        let payload = vec![b'x'; 512 * 1024];
        let cmd = SafeCommand::new("cat")
            .unwrap()
            .stdin_payload(payload.clone())
            .unwrap();
        let run = cmd.execute_async();
        let output = tokio::time::timeout(std::time::Duration::from_secs(10), run)
            .await
            .expect("cat stalled on a payload larger than the pipe buffer")
            .unwrap();

        assert!(output.status.success());
        assert_eq!(output.stdout.len(), payload.len());
        assert_eq!(output.stdout, payload);
    }

    #[tokio::test]
    async fn test_execute_reports_non_zero_exit() {
        let output = SafeCommand::new("false")
            .unwrap()
            .execute_async()
            .await
            .unwrap();
        assert!(!output.status.success());
    }

    #[tokio::test]
    async fn test_execute_missing_program() {
        let result = SafeCommand::new("definitely-not-installed-tool")
            .unwrap()
            .execute_async()
            .await;
        assert!(matches!(result, Err(CommandGuardError::ExecutionFailed(_))));
    }

    #[test]
    fn test_command_guard_error_display() {
        let err = CommandGuardError::InvalidProgram("bin/sh".to_string());
        assert!(err.to_string().contains("bin/sh"));

        let err2 = CommandGuardError::ShellInjectionAttempt("$(id)".to_string());
        assert!(err2.to_string().contains("injection"));
    }
}
