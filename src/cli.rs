//! Command line entry points.

use anyhow::{bail, Context, Result};
use std::sync::Arc;
use tracing::{error, info};

use crate::core::backend::BackendClient;
use crate::core::config::AppConfig;
use crate::core::shared::state::AppState;
use crate::core::shared::utils::redact_database_url;
use crate::datamodel::{schema_script, schema_statements};
use crate::main_module::run_axum_server;
use crate::mcp::CliTool;
use crate::migrations::{RunnerOptions, StatementRunner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Serve,
    SchemaPrint,
    SchemaApply { direct: bool, continue_on_error: bool },
    Help,
}

pub const USAGE: &str = "usage: bizdash [serve | schema print | schema apply [--direct] [--continue-on-error]]";

impl Command {
    /// Parses the arguments after the program name.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let words: Vec<&str> = args.iter().map(String::as_str).collect();
        match words.as_slice() {
            [] | ["serve"] => Ok(Self::Serve),
            ["--help"] | ["-h"] | ["help"] => Ok(Self::Help),
            ["schema", "print"] => Ok(Self::SchemaPrint),
            ["schema", "apply", flags @ ..] => {
                let mut direct = false;
                let mut continue_on_error = false;
                for flag in flags {
                    match *flag {
                        "--direct" => direct = true,
                        "--continue-on-error" => continue_on_error = true,
                        other => return Err(format!("unknown flag '{other}'")),
                    }
                }
                if continue_on_error && !direct {
                    return Err("--continue-on-error requires --direct".to_string());
                }
                Ok(Self::SchemaApply {
                    direct,
                    continue_on_error,
                })
            }
            _ => Err(format!("unknown command '{}'", words.join(" "))),
        }
    }

    /// Whether the command talks to the backend and therefore needs its
    /// credentials.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Self::SchemaPrint | Self::Help)
    }
}

pub async fn run(command: Command, config: Option<AppConfig>) -> Result<()> {
    match (command, config) {
        (Command::Help, _) => {
            println!("{USAGE}");
            Ok(())
        }
        (Command::SchemaPrint, _) => {
            print!("{}", schema_script());
            Ok(())
        }
        (Command::Serve, Some(config)) => serve(config).await,
        (Command::SchemaApply { direct: false, .. }, Some(config)) => {
            apply_via_backend(&config).await
        }
        (
            Command::SchemaApply {
                direct: true,
                continue_on_error,
            },
            Some(config),
        ) => apply_direct(&config, continue_on_error).await,
        (_, None) => bail!("configuration is required for this command"),
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    let backend = BackendClient::new(&config.backend)?;
    let tool = Arc::new(CliTool::new(&config.tool, &config.backend.project_ref));

    info!(
        "Backend {} (project {}), tool '{} call {}'",
        backend.base_url(),
        backend.project_ref(),
        config.tool.bin,
        config.tool.server
    );
    if config.tool.access_token.is_none() {
        info!("MCP_ACCESS_TOKEN not set; tool calls will likely fall back to simulated responses");
    }

    let state = Arc::new(AppState::new(config, backend, tool));
    run_axum_server(state).await?;
    Ok(())
}

async fn apply_via_backend(config: &AppConfig) -> Result<()> {
    let backend = BackendClient::new(&config.backend)?;
    let script = schema_script();

    info!("Submitting schema ({} bytes) to {}", script.len(), backend.base_url());
    let result = backend
        .exec_sql(&script)
        .await
        .context("Schema application failed")?;

    info!("Schema applied");
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn apply_direct(config: &AppConfig, continue_on_error: bool) -> Result<()> {
    let Some(database_url) = config.database_url.clone() else {
        bail!("DATABASE_URL is required for schema apply --direct");
    };

    info!("Applying schema directly to {}", redact_database_url(&database_url));

    let report = tokio::task::spawn_blocking(move || {
        let runner = StatementRunner::connect(&database_url, RunnerOptions { continue_on_error })?;
        runner.run(&schema_statements())
    })
    .await
    .context("Statement runner panicked")??;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(failure) = report.first_failure() {
        error!("{} of {} statements failed", report.failed, report.outcomes.len());
        bail!(
            "{} failed: {}",
            failure.label,
            failure.error.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}
