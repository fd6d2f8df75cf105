#[derive(Debug)]
pub struct ApiUrls;

impl ApiUrls {
    // Schema operations through the external tool
    pub const MIGRATIONS: &'static str = "/api/migrations";
    pub const TABLES: &'static str = "/api/tables";
    pub const ADVISORS: &'static str = "/api/advisors";

    // Dashboard reads over the derived views
    pub const DASHBOARD_EMPLOYEES: &'static str = "/api/dashboard/employees";
    pub const DASHBOARD_PROJECT_STATISTICS: &'static str = "/api/dashboard/projects/statistics";
    pub const DASHBOARD_RANKING: &'static str = "/api/dashboard/ranking";

    // Health
    pub const HEALTH: &'static str = "/health";
    pub const HEALTH_LATENCY: &'static str = "/api/health/latency";
}

#[derive(Debug)]
pub struct BackendUrls;

impl BackendUrls {
    pub const REST: &'static str = "/rest/v1";
    pub const RPC_EXEC_SQL: &'static str = "/rest/v1/rpc/exec_sql";
}
