use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

use crate::core::shared::error::ApiError;
use crate::mcp::Method;

pub const MIGRATION_NAME_PATTERN: &str = r"^[a-z0-9_]+$";

static NAME_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn is_valid_name(name: &str) -> bool {
    NAME_RE
        .get_or_init(|| Regex::new(MIGRATION_NAME_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(name))
}

/// A migration name made only of lowercase letters, digits and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MigrationName(String);

impl MigrationName {
    pub fn parse(name: &str) -> Result<Self, ApiError> {
        if is_valid_name(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(ApiError::InvalidName(format!(
                "'{name}' must contain only lowercase letters, numbers, and underscores"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MigrationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request body as received; fields are optional so that missing ones map to
/// a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MigrationRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMigration {
    pub name: MigrationName,
    pub query: String,
}

impl MigrationRequest {
    pub fn validate(self) -> Result<ValidatedMigration, ApiError> {
        let name = self.name.filter(|n| !n.trim().is_empty());
        let query = self.query.filter(|q| !q.trim().is_empty());

        let (Some(name), Some(query)) = (name, query) else {
            return Err(ApiError::Validation(
                "Both name and query are required".to_string(),
            ));
        };

        Ok(ValidatedMigration {
            name: MigrationName::parse(&name)?,
            query,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MigrationEcho {
    pub name: MigrationName,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatedMigration {
    pub message: String,
    pub migration_applied: MigrationName,
    pub sql_executed: String,
    pub note: String,
    pub warning: String,
}

impl SimulatedMigration {
    pub fn for_migration(migration: &ValidatedMigration) -> Self {
        Self {
            message: format!("Migration '{}' applied (simulated)", migration.name),
            migration_applied: migration.name.clone(),
            sql_executed: migration.query.clone(),
            note: "Demo mode: the statement was not sent to a database".to_string(),
            warning: "MCP tool unavailable or access token not configured; the schema was not changed"
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationResponse {
    pub success: bool,
    pub result: Value,
    pub migration: MigrationEcho,
    pub timestamp: String,
    pub method: Method,
}
