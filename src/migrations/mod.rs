mod handlers;
pub mod runner;
mod service;
mod tests;
pub mod types;

pub use handlers::configure_migration_routes;
pub use runner::{MigrationReport, RunnerOptions, StatementOutcome, StatementRunner};
pub use service::{apply_migration, APPLY_MIGRATION_OPERATION};
pub use types::{
    MigrationEcho, MigrationName, MigrationRequest, MigrationResponse, SimulatedMigration,
    ValidatedMigration,
};
