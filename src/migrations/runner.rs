//! Applies the schema one statement at a time over a direct connection.
//!
//! The backend RPC path runs the whole script as one opaque string; this
//! runner exists for diagnosis, so every statement gets its own outcome row
//! in `schema_statement_log`.

use anyhow::Context;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool, Nullable, Text, Uuid as DieselUuid};
use serde::Serialize;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

use crate::core::shared::utils::{create_conn, DbPool};
use crate::datamodel::{SchemaStatement, StatementKind};

pub const STATEMENT_LOG_TABLE_SQL: &str = r#"CREATE TABLE IF NOT EXISTS schema_statement_log (
    id BIGSERIAL PRIMARY KEY,
    run_id UUID NOT NULL,
    label TEXT NOT NULL,
    kind TEXT NOT NULL,
    success BOOLEAN NOT NULL,
    error TEXT,
    elapsed_ms BIGINT NOT NULL,
    executed_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)"#;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunnerOptions {
    pub continue_on_error: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatementOutcome {
    pub label: String,
    pub kind: StatementKind,
    pub success: bool,
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub run_id: Uuid,
    pub applied: usize,
    pub failed: usize,
    pub outcomes: Vec<StatementOutcome>,
}

impl MigrationReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn first_failure(&self) -> Option<&StatementOutcome> {
        self.outcomes.iter().find(|o| !o.success)
    }
}

pub struct StatementRunner {
    pool: DbPool,
    options: RunnerOptions,
}

impl StatementRunner {
    pub fn connect(database_url: &str, options: RunnerOptions) -> anyhow::Result<Self> {
        let pool = create_conn(database_url).context("Failed to create database pool")?;
        Ok(Self::with_pool(pool, options))
    }

    pub fn with_pool(pool: DbPool, options: RunnerOptions) -> Self {
        Self { pool, options }
    }

    /// Executes the statements in order. Stops after the first failure unless
    /// `continue_on_error` is set. Failed statements are reported, not raised;
    /// only connection problems and log-table setup return `Err`.
    pub fn run(&self, statements: &[SchemaStatement]) -> anyhow::Result<MigrationReport> {
        let mut conn = self.pool.get().context("Failed to get database connection")?;

        conn.batch_execute(STATEMENT_LOG_TABLE_SQL)
            .context("Failed to create schema_statement_log")?;

        let run_id = Uuid::new_v4();
        let mut report = MigrationReport {
            run_id,
            applied: 0,
            failed: 0,
            outcomes: Vec::with_capacity(statements.len()),
        };

        info!("Schema run {run_id}: {} statements", statements.len());

        for statement in statements {
            let started = Instant::now();
            let result = conn.batch_execute(&statement.sql);
            let elapsed_ms = started.elapsed().as_millis() as u64;

            let outcome = StatementOutcome {
                label: statement.label.clone(),
                kind: statement.kind,
                success: result.is_ok(),
                error: result.err().map(|e| e.to_string()),
                elapsed_ms,
            };

            if let Err(e) = record_outcome(&mut conn, run_id, &outcome) {
                error!("Failed to record outcome of {}: {e}", outcome.label);
            }

            let failed = !outcome.success;
            if failed {
                report.failed += 1;
                error!(
                    "{} failed after {elapsed_ms}ms: {}",
                    outcome.label,
                    outcome.error.as_deref().unwrap_or_default()
                );
            } else {
                report.applied += 1;
            }
            report.outcomes.push(outcome);

            if failed && !self.options.continue_on_error {
                break;
            }
        }

        info!(
            "Schema run {run_id} finished: {} applied, {} failed",
            report.applied, report.failed
        );
        Ok(report)
    }
}

fn record_outcome(
    conn: &mut PgConnection,
    run_id: Uuid,
    outcome: &StatementOutcome,
) -> QueryResult<usize> {
    diesel::sql_query(
        "INSERT INTO schema_statement_log (run_id, label, kind, success, error, elapsed_ms)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind::<DieselUuid, _>(run_id)
    .bind::<Text, _>(outcome.label.clone())
    .bind::<Text, _>(outcome.kind.to_string())
    .bind::<Bool, _>(outcome.success)
    .bind::<Nullable<Text>, _>(outcome.error.clone())
    .bind::<BigInt, _>(i64::try_from(outcome.elapsed_ms).unwrap_or(i64::MAX))
    .execute(conn)
}
