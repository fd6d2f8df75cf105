use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use super::client::{ExternalTool, ToolOutput};
use super::error::ExternalToolError;
use super::fallback::{call_with_fallback, Method};

pub const GET_ADVISORS_OPERATION: &str = "get_advisors";
pub const SECURITY_ADVISOR: &str = "security";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorySeverity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl AdvisorySeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
        }
    }

    /// Maps a linter level (`ERROR`, `WARN`, `INFO`) to a severity.
    pub fn from_level(level: &str) -> Self {
        match level.to_ascii_uppercase().as_str() {
            "CRITICAL" => Self::Critical,
            "ERROR" => Self::High,
            "WARN" | "WARNING" => Self::Medium,
            "INFO" => Self::Low,
            _ => Self::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub id: String,
    #[serde(rename = "type")]
    pub advisor_type: String,
    pub severity: AdvisorySeverity,
    pub category: String,
    pub title: String,
    pub description: String,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

/// A lint as printed by the advisor tool.
#[derive(Debug, Deserialize)]
struct Lint {
    name: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    remediation: Option<String>,
    #[serde(default)]
    metadata: Option<Value>,
    #[serde(default)]
    cache_key: Option<String>,
}

impl Lint {
    fn into_advisory(self, advisor_type: &str) -> Advisory {
        let table = self
            .metadata
            .as_ref()
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Advisory {
            id: self.cache_key.unwrap_or_else(|| self.name.clone()),
            advisor_type: advisor_type.to_string(),
            severity: AdvisorySeverity::from_level(self.level.as_deref().unwrap_or_default()),
            category: self
                .categories
                .first()
                .map(|c| c.to_lowercase())
                .unwrap_or_else(|| advisor_type.to_string()),
            title: self.title.unwrap_or_else(|| self.name.replace('_', " ")),
            description: self.detail.or(self.description).unwrap_or_default(),
            recommendation: self.remediation.unwrap_or_default(),
            table,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdvisorsPayload {
    pub advisors: Vec<Advisory>,
    pub raw_output: Option<String>,
    pub note: Option<String>,
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvisorListing {
    pub advisors: Vec<Advisory>,
    pub total: usize,
    pub by_severity: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
    pub advisor_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub timestamp: String,
    pub method: Method,
}

pub fn group_by_severity(advisors: &[Advisory]) -> BTreeMap<String, usize> {
    let mut groups = BTreeMap::new();
    for advisory in advisors {
        *groups.entry(advisory.severity.as_str().to_string()).or_insert(0) += 1;
    }
    groups
}

pub fn group_by_category(advisors: &[Advisory]) -> BTreeMap<String, usize> {
    let mut groups = BTreeMap::new();
    for advisory in advisors {
        *groups.entry(advisory.category.clone()).or_insert(0) += 1;
    }
    groups
}

pub fn parse_advisors(output: ToolOutput) -> Result<AdvisorsPayload, ExternalToolError> {
    let value = match output {
        ToolOutput::Json(value) => value,
        ToolOutput::Raw(text) => {
            return Ok(AdvisorsPayload {
                raw_output: Some(text),
                ..AdvisorsPayload::default()
            })
        }
    };

    let lints = match &value {
        Value::Object(map) => map.get("lints").cloned().unwrap_or(Value::Null),
        other => other.clone(),
    };

    match serde_json::from_value::<Vec<Lint>>(lints) {
        Ok(lints) => Ok(AdvisorsPayload {
            advisors: lints
                .into_iter()
                .map(|l| l.into_advisory(SECURITY_ADVISOR))
                .collect(),
            ..AdvisorsPayload::default()
        }),
        Err(_) => Ok(AdvisorsPayload {
            raw_output: Some(value.to_string()),
            ..AdvisorsPayload::default()
        }),
    }
}

pub fn simulated_advisors() -> AdvisorsPayload {
    let advisory = |id: &str,
                    severity: AdvisorySeverity,
                    category: &str,
                    title: &str,
                    description: &str,
                    recommendation: &str,
                    table: Option<&str>| Advisory {
        id: id.to_string(),
        advisor_type: SECURITY_ADVISOR.to_string(),
        severity,
        category: category.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        recommendation: recommendation.to_string(),
        table: table.map(str::to_string),
    };

    AdvisorsPayload {
        advisors: vec![
            advisory(
                "rls_disabled_in_public_documents",
                AdvisorySeverity::High,
                "security",
                "RLS Disabled in Public",
                "Table public.documents is exposed through the API without row level security",
                "Enable row level security on public.documents and add policies per company",
                Some("documents"),
            ),
            advisory(
                "rls_disabled_in_public_budgets",
                AdvisorySeverity::High,
                "security",
                "RLS Disabled in Public",
                "Table public.budgets is exposed through the API without row level security",
                "Enable row level security on public.budgets and restrict reads to managers",
                Some("budgets"),
            ),
            advisory(
                "function_search_path_mutable_touch_updated_at",
                AdvisorySeverity::Medium,
                "security",
                "Function Search Path Mutable",
                "Function public.touch_updated_at has a role mutable search_path",
                "Set search_path explicitly on the function definition",
                None,
            ),
            advisory(
                "auth_leaked_password_protection",
                AdvisorySeverity::Medium,
                "auth",
                "Leaked Password Protection Disabled",
                "Passwords are not checked against known leaked password lists",
                "Enable leaked password protection in the auth settings",
                None,
            ),
            advisory(
                "auth_otp_long_expiry",
                AdvisorySeverity::Low,
                "auth",
                "OTP Long Expiry",
                "One-time passwords stay valid for more than one hour",
                "Lower the OTP expiry to one hour or less",
                None,
            ),
        ],
        raw_output: None,
        note: Some("Simulated security advisories for demonstration".to_string()),
        warning: Some(
            "MCP tool unavailable or access token not configured; advisories are not from the live project"
                .to_string(),
        ),
    }
}

pub async fn list_advisors(tool: &dyn ExternalTool) -> AdvisorListing {
    let input = json!({ "type": SECURITY_ADVISOR });
    let outcome =
        call_with_fallback(tool, GET_ADVISORS_OPERATION, &input, parse_advisors, simulated_advisors)
            .await;

    let timestamp = outcome.timestamp();
    let payload = outcome.payload;
    AdvisorListing {
        total: payload.advisors.len(),
        by_severity: group_by_severity(&payload.advisors),
        by_category: group_by_category(&payload.advisors),
        advisors: payload.advisors,
        advisor_type: SECURITY_ADVISOR,
        raw_output: payload.raw_output,
        note: payload.note,
        warning: payload.warning,
        timestamp,
        method: outcome.method,
    }
}
