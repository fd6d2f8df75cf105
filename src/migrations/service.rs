use serde_json::{json, Value};
use tracing::info;

use super::types::{MigrationEcho, MigrationResponse, SimulatedMigration, ValidatedMigration};
use crate::mcp::{call_with_fallback, ExternalTool};

pub const APPLY_MIGRATION_OPERATION: &str = "apply_migration";

/// Forwards a validated migration to the external tool. Only the real path
/// touches the remote schema; a failed call yields the simulated result.
pub async fn apply_migration(
    tool: &dyn ExternalTool,
    migration: ValidatedMigration,
) -> MigrationResponse {
    info!("Applying migration {}", migration.name);

    let input = json!({
        "name": migration.name.as_str(),
        "query": migration.query,
    });

    let outcome = call_with_fallback(
        tool,
        APPLY_MIGRATION_OPERATION,
        &input,
        |output| output.into_json(),
        || {
            serde_json::to_value(SimulatedMigration::for_migration(&migration))
                .unwrap_or(Value::Null)
        },
    )
    .await;

    let timestamp = outcome.timestamp();
    MigrationResponse {
        success: true,
        result: outcome.payload,
        migration: MigrationEcho {
            name: migration.name,
            query: migration.query,
        },
        timestamp,
        method: outcome.method,
    }
}
