use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::client::{ExternalTool, ToolOutput};
use super::error::ExternalToolError;
use super::fallback::{call_with_fallback, Method};
use crate::datamodel::{TABLES, VIEWS};

pub const LIST_TABLES_OPERATION: &str = "list_tables";
pub const PUBLIC_SCHEMA: &str = "public";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    #[serde(default = "default_schema")]
    pub schema: String,
    pub name: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default, alias = "comment")]
    pub description: Option<String>,
}

fn default_schema() -> String {
    PUBLIC_SCHEMA.to_string()
}

fn default_kind() -> String {
    "table".to_string()
}

#[derive(Debug, Clone, Default)]
pub struct TablesPayload {
    pub tables: Vec<TableInfo>,
    pub raw_output: Option<String>,
    pub note: Option<String>,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableListing {
    pub tables: Vec<TableInfo>,
    pub total: usize,
    pub schema: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub timestamp: String,
    pub method: Method,
}

/// Tool output becomes a table list when it has the expected shape and a
/// diagnostic payload otherwise.
pub fn parse_tables(output: ToolOutput) -> Result<TablesPayload, ExternalToolError> {
    let value = match output {
        ToolOutput::Json(value) => value,
        ToolOutput::Raw(text) => {
            return Ok(TablesPayload {
                raw_output: Some(text),
                ..TablesPayload::default()
            })
        }
    };

    let candidate = match &value {
        Value::Object(map) => map.get("tables").cloned().unwrap_or(Value::Null),
        other => other.clone(),
    };

    match serde_json::from_value::<Vec<TableInfo>>(candidate) {
        Ok(tables) => Ok(TablesPayload {
            tables,
            ..TablesPayload::default()
        }),
        Err(_) => Ok(TablesPayload {
            raw_output: Some(value.to_string()),
            ..TablesPayload::default()
        }),
    }
}

fn describe(name: &str) -> &'static str {
    match name {
        "companies" => "Companies and their branch hierarchy",
        "profiles" => "User profiles linked to a company",
        "employees" => "Employment records for profiles",
        "projects" => "Company projects with budget and schedule",
        "tasks" => "Project tasks",
        "budgets" => "Budget allocations per category and period",
        "work_schedules" => "Weekly working hours per profile",
        "chat_channels" => "Chat channels",
        "chat_members" => "Channel membership",
        "chat_messages" => "Messages posted in channels",
        "documents" => "Uploaded company documents",
        "document_permissions" => "Per-profile document access",
        "challenges" => "Gamification challenges",
        "challenge_participations" => "Profile progress on challenges",
        "time_entries" => "Clock-in and clock-out records",
        "employees_with_profile" => "Employees joined with profile and company",
        "project_statistics" => "Task counts and completion per project",
        "gamification_ranking" => "Profiles ranked by earned points",
        _ => "",
    }
}

pub fn simulated_tables() -> TablesPayload {
    let tables = TABLES
        .iter()
        .map(|t| (t.name, "table"))
        .chain(VIEWS.iter().map(|v| (v.name, "view")))
        .map(|(name, kind)| TableInfo {
            schema: PUBLIC_SCHEMA.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            description: Some(describe(name).to_string()),
        })
        .collect();

    TablesPayload {
        tables,
        raw_output: None,
        note: Some(
            "Simulated table listing generated from the local schema definition".to_string(),
        ),
        warning: Some(
            "MCP tool unavailable or access token not configured; data does not reflect the live database"
                .to_string(),
        ),
    }
}

pub async fn list_tables(tool: &dyn ExternalTool) -> TableListing {
    let input = json!({ "schemas": [PUBLIC_SCHEMA] });
    let outcome = call_with_fallback(
        tool,
        LIST_TABLES_OPERATION,
        &input,
        parse_tables,
        simulated_tables,
    )
    .await;

    let timestamp = outcome.timestamp();
    let payload = outcome.payload;
    TableListing {
        total: payload.tables.len(),
        tables: payload.tables,
        schema: PUBLIC_SCHEMA,
        raw_output: payload.raw_output,
        note: payload.note,
        warning: payload.warning,
        timestamp,
        method: outcome.method,
    }
}
