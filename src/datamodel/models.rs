use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{
    BigInt, Bool, Date, Nullable, Numeric, Text, Timestamptz, Uuid as DieselUuid,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row of `employees_with_profile`.
#[derive(Debug, Clone, Serialize, Deserialize, QueryableByName)]
pub struct EmployeeWithProfile {
    #[diesel(sql_type = DieselUuid)]
    pub id: Uuid,
    #[diesel(sql_type = DieselUuid)]
    pub profile_id: Uuid,
    #[diesel(sql_type = Nullable<DieselUuid>)]
    pub manager_id: Option<Uuid>,
    #[diesel(sql_type = Text)]
    pub position: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub department: Option<String>,
    #[diesel(sql_type = Date)]
    pub hire_date: NaiveDate,
    #[diesel(sql_type = Nullable<Numeric>)]
    pub salary: Option<BigDecimal>,
    #[diesel(sql_type = Bool)]
    pub is_active: bool,
    #[diesel(sql_type = Timestamptz)]
    pub created_at: DateTime<Utc>,
    #[diesel(sql_type = Timestamptz)]
    pub updated_at: DateTime<Utc>,
    #[diesel(sql_type = Text)]
    pub full_name: String,
    #[diesel(sql_type = Text)]
    pub email: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub avatar_url: Option<String>,
    #[diesel(sql_type = DieselUuid)]
    pub company_id: Uuid,
    #[diesel(sql_type = Nullable<Text>)]
    pub company_name: Option<String>,
}

/// Row of `project_statistics`.
#[derive(Debug, Clone, Serialize, Deserialize, QueryableByName)]
pub struct ProjectStatistics {
    #[diesel(sql_type = DieselUuid)]
    pub id: Uuid,
    #[diesel(sql_type = DieselUuid)]
    pub company_id: Uuid,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Text)]
    pub status: String,
    #[diesel(sql_type = Numeric)]
    pub budget: BigDecimal,
    #[diesel(sql_type = Nullable<Date>)]
    pub start_date: Option<NaiveDate>,
    #[diesel(sql_type = Nullable<Date>)]
    pub end_date: Option<NaiveDate>,
    #[diesel(sql_type = BigInt)]
    pub total_tasks: i64,
    #[diesel(sql_type = BigInt)]
    pub completed_tasks: i64,
    #[diesel(sql_type = Numeric)]
    pub completion_percentage: BigDecimal,
}

/// Row of `gamification_ranking`.
#[derive(Debug, Clone, Serialize, Deserialize, QueryableByName)]
pub struct GamificationRank {
    #[diesel(sql_type = DieselUuid)]
    pub profile_id: Uuid,
    #[diesel(sql_type = DieselUuid)]
    pub company_id: Uuid,
    #[diesel(sql_type = Text)]
    pub full_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub avatar_url: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub total_points: i64,
    #[diesel(sql_type = BigInt)]
    pub challenges_completed: i64,
    #[diesel(sql_type = BigInt)]
    pub rank: i64,
}
