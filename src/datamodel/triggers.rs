use super::tables::TABLES;

pub const TOUCH_FUNCTION_NAME: &str = "touch_updated_at";

/// Stamps `updated_at` on every update, whichever columns changed.
/// `clock_timestamp()` keeps the stamp increasing inside one transaction too.
pub const TOUCH_FUNCTION_SQL: &str = r#"CREATE OR REPLACE FUNCTION touch_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = clock_timestamp();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql"#;

pub fn trigger_name(table: &str) -> String {
    format!("trg_{table}_touch_updated_at")
}

/// Tables that get the shared trigger.
pub fn touched_tables() -> impl Iterator<Item = &'static str> {
    TABLES.iter().filter(|t| t.has_updated_at()).map(|t| t.name)
}

pub fn drop_trigger_sql(table: &str) -> String {
    format!("DROP TRIGGER IF EXISTS {} ON {table}", trigger_name(table))
}

pub fn create_trigger_sql(table: &str) -> String {
    format!(
        "CREATE TRIGGER {} BEFORE UPDATE ON {table} FOR EACH ROW EXECUTE FUNCTION {TOUCH_FUNCTION_NAME}()",
        trigger_name(table)
    )
}
