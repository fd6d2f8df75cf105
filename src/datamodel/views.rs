/// A derived, read-only relation. Re-applied as drop + create so the
/// definition never drifts from this file.
#[derive(Debug, Clone, Copy)]
pub struct ViewDef {
    pub name: &'static str,
    pub select: &'static str,
}

impl ViewDef {
    pub fn drop_sql(&self) -> String {
        format!("DROP VIEW IF EXISTS {} CASCADE", self.name)
    }

    pub fn create_sql(&self) -> String {
        format!("CREATE VIEW {} AS\n{}", self.name, self.select)
    }
}

pub const EMPLOYEES_WITH_PROFILE: ViewDef = ViewDef {
    name: "employees_with_profile",
    select: r#"SELECT
    e.id,
    e.profile_id,
    e.manager_id,
    e.position,
    e.department,
    e.hire_date,
    e.salary,
    e.is_active,
    e.created_at,
    e.updated_at,
    p.full_name,
    p.email,
    p.avatar_url,
    p.company_id,
    c.name AS company_name
FROM employees e
JOIN profiles p ON p.id = e.profile_id
LEFT JOIN companies c ON c.id = p.company_id"#,
};

pub const PROJECT_STATISTICS: ViewDef = ViewDef {
    name: "project_statistics",
    select: r#"SELECT
    p.id,
    p.company_id,
    p.name,
    p.status,
    p.budget,
    p.start_date,
    p.end_date,
    COUNT(t.id) AS total_tasks,
    COUNT(t.id) FILTER (WHERE t.status = 'completed') AS completed_tasks,
    CASE
        WHEN COUNT(t.id) = 0 THEN 0::numeric
        ELSE ROUND(
            COUNT(t.id) FILTER (WHERE t.status = 'completed')::numeric * 100 / COUNT(t.id),
            2
        )
    END AS completion_percentage
FROM projects p
LEFT JOIN tasks t ON t.project_id = p.id
GROUP BY p.id"#,
};

pub const GAMIFICATION_RANKING: ViewDef = ViewDef {
    name: "gamification_ranking",
    select: r#"SELECT
    p.id AS profile_id,
    p.company_id,
    p.full_name,
    p.avatar_url,
    COALESCE(SUM(c.points_reward) FILTER (WHERE cp.status = 'completed'), 0)::bigint AS total_points,
    COUNT(cp.id) FILTER (WHERE cp.status = 'completed') AS challenges_completed,
    ROW_NUMBER() OVER (
        ORDER BY COALESCE(SUM(c.points_reward) FILTER (WHERE cp.status = 'completed'), 0) DESC,
            p.created_at,
            p.id
    ) AS rank
FROM profiles p
LEFT JOIN challenge_participations cp ON cp.profile_id = p.id
LEFT JOIN challenges c ON c.id = cp.challenge_id
WHERE p.is_active
GROUP BY p.id"#,
};

pub const VIEWS: &[ViewDef] = &[EMPLOYEES_WITH_PROFILE, PROJECT_STATISTICS, GAMIFICATION_RANKING];
