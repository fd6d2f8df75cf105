//! Relational data model of the dashboard.
//!
//! Everything here renders to one idempotent SQL script: tables, the shared
//! `updated_at` trigger, foreign-key indexes, derived views and seed rows.
//! Re-applying the script against a database in any earlier state is safe.

mod models;
mod seeds;
mod tables;
mod tests;
mod triggers;
mod views;

pub use models::{EmployeeWithProfile, GamificationRank, ProjectStatistics};
pub use seeds::{seed_challenges_sql, ChallengeType, SeedChallenge, SEED_CHALLENGES};
pub use tables::{table, IndexDef, TableDef, INDEXES, TABLES};
pub use triggers::{touched_tables, trigger_name, TOUCH_FUNCTION_NAME};
pub use views::{ViewDef, EMPLOYEES_WITH_PROFILE, GAMIFICATION_RANKING, PROJECT_STATISTICS, VIEWS};

use serde::Serialize;

const EXTENSION_SQL: &str = "CREATE EXTENSION IF NOT EXISTS pgcrypto";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Extension,
    Table,
    Function,
    Trigger,
    Index,
    View,
    Seed,
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Extension => "extension",
            Self::Table => "table",
            Self::Function => "function",
            Self::Trigger => "trigger",
            Self::Index => "index",
            Self::View => "view",
            Self::Seed => "seed",
        };
        f.write_str(s)
    }
}

/// A single executable statement of the schema script.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaStatement {
    pub kind: StatementKind,
    pub label: String,
    pub sql: String,
}

impl SchemaStatement {
    fn new(kind: StatementKind, label: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            sql: sql.into(),
        }
    }
}

/// The schema as an ordered list of statements.
///
/// Order: extension, tables (dependency order), trigger function, triggers,
/// indexes, views, seeds.
pub fn schema_statements() -> Vec<SchemaStatement> {
    let mut statements = vec![SchemaStatement::new(
        StatementKind::Extension,
        "extension pgcrypto",
        EXTENSION_SQL,
    )];

    for table in TABLES {
        statements.push(SchemaStatement::new(
            StatementKind::Table,
            format!("table {}", table.name),
            table.sql,
        ));
    }

    statements.push(SchemaStatement::new(
        StatementKind::Function,
        format!("function {TOUCH_FUNCTION_NAME}"),
        triggers::TOUCH_FUNCTION_SQL,
    ));

    for table in touched_tables() {
        statements.push(SchemaStatement::new(
            StatementKind::Trigger,
            format!("drop trigger {}", trigger_name(table)),
            triggers::drop_trigger_sql(table),
        ));
        statements.push(SchemaStatement::new(
            StatementKind::Trigger,
            format!("create trigger {}", trigger_name(table)),
            triggers::create_trigger_sql(table),
        ));
    }

    for index in INDEXES {
        statements.push(SchemaStatement::new(
            StatementKind::Index,
            format!("index {}", index.name()),
            index.create_sql(),
        ));
    }
    statements.push(SchemaStatement::new(
        StatementKind::Index,
        "index challenges_name_key",
        seeds::CHALLENGE_NAME_INDEX_SQL,
    ));

    for view in VIEWS {
        statements.push(SchemaStatement::new(
            StatementKind::View,
            format!("drop view {}", view.name),
            view.drop_sql(),
        ));
        statements.push(SchemaStatement::new(
            StatementKind::View,
            format!("create view {}", view.name),
            view.create_sql(),
        ));
    }

    statements.push(SchemaStatement::new(
        StatementKind::Seed,
        "seed challenges",
        seed_challenges_sql(),
    ));

    statements
}

/// The whole schema as one script, suitable for the `exec_sql` RPC.
pub fn schema_script() -> String {
    let mut script = String::from("-- bizdash schema (idempotent)\n\n");
    for statement in schema_statements() {
        script.push_str("-- ");
        script.push_str(&statement.label);
        script.push('\n');
        script.push_str(&statement.sql);
        script.push_str(";\n\n");
    }
    script
}
