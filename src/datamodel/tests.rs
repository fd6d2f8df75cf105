#[cfg(test)]
mod tests {
    use super::super::*;
    use regex::Regex;
    use std::collections::HashSet;

    fn foreign_keys(sql: &str) -> Vec<(String, String)> {
        let re = Regex::new(r"(?m)^\s*(\w+)\s+UUID\b[^\n]*\bREFERENCES\s+(\w+)\s*\(").unwrap();
        re.captures_iter(sql)
            .map(|c| (c[1].to_string(), c[2].to_string()))
            .collect()
    }

    #[test]
    fn test_tables_declared_in_dependency_order() {
        let mut declared: HashSet<&str> = HashSet::new();
        for table in TABLES {
            for (column, target) in foreign_keys(table.sql) {
                assert!(
                    target == table.name || declared.contains(target.as_str()),
                    "{}.{column} references {target} before it is declared",
                    table.name
                );
            }
            assert!(declared.insert(table.name), "duplicate table {}", table.name);
        }
    }

    #[test]
    fn test_self_references() {
        let companies = foreign_keys(table("companies").unwrap().sql);
        assert!(companies.contains(&("parent_company_id".to_string(), "companies".to_string())));

        let employees = foreign_keys(table("employees").unwrap().sql);
        assert!(employees.contains(&("manager_id".to_string(), "employees".to_string())));
        assert!(employees.contains(&("profile_id".to_string(), "profiles".to_string())));
    }

    #[test]
    fn test_every_create_is_guarded() {
        for table in TABLES {
            assert!(
                table.sql.starts_with(&format!("CREATE TABLE IF NOT EXISTS {} (", table.name)),
                "{} is not guarded",
                table.name
            );
        }
        for index in INDEXES {
            assert!(index.create_sql().starts_with("CREATE INDEX IF NOT EXISTS"));
        }
    }

    #[test]
    fn test_indexes_only_on_foreign_keys() {
        let mut names = HashSet::new();
        for index in INDEXES {
            let table =
                table(index.table).unwrap_or_else(|| panic!("unknown table {}", index.table));
            let fk_columns: Vec<String> = foreign_keys(table.sql)
                .into_iter()
                .map(|(c, _)| c)
                .collect();
            assert!(
                fk_columns.iter().any(|c| c == index.column),
                "{} is not a foreign key of {}",
                index.column,
                index.table
            );
            assert!(names.insert(index.name()));
        }
    }

    #[test]
    fn test_trigger_attached_to_every_updated_at_table() {
        let statements = schema_statements();
        for table in TABLES {
            let create = format!("create trigger {}", trigger_name(table.name));
            let drop = format!("drop trigger {}", trigger_name(table.name));
            let has_create = statements.iter().any(|s| s.label == create);
            let has_drop = statements.iter().any(|s| s.label == drop);

            assert_eq!(has_create, table.has_updated_at(), "trigger mismatch on {}", table.name);
            assert_eq!(has_drop, table.has_updated_at());
        }

        assert!(!table("chat_members").unwrap().has_updated_at());
        assert!(!table("document_permissions").unwrap().has_updated_at());
        assert!(table("profiles").unwrap().has_updated_at());
    }

    #[test]
    fn test_statement_order() {
        let statements = schema_statements();
        let position = |label: &str| {
            statements
                .iter()
                .position(|s| s.label == label)
                .unwrap_or_else(|| panic!("missing statement {label}"))
        };

        let function = position("function touch_updated_at");
        assert!(position("table time_entries") < function);
        assert!(function < position("create trigger trg_companies_touch_updated_at"));
        assert!(position("drop trigger trg_companies_touch_updated_at")
            < position("create trigger trg_companies_touch_updated_at"));
        assert!(
            position("drop view project_statistics") < position("create view project_statistics")
        );
        assert!(position("index challenges_name_key") < position("seed challenges"));
        assert_eq!(statements[0].kind, StatementKind::Extension);
        assert_eq!(statements.last().map(|s| s.kind), Some(StatementKind::Seed));
    }

    #[test]
    fn test_views_are_replaced_wholesale() {
        for view in VIEWS {
            assert_eq!(view.drop_sql(), format!("DROP VIEW IF EXISTS {} CASCADE", view.name));
            assert!(view.create_sql().starts_with(&format!("CREATE VIEW {} AS", view.name)));
            assert!(!view.create_sql().contains("OR REPLACE"));
        }
    }

    #[test]
    fn test_project_statistics_percentage_expression() {
        let select = PROJECT_STATISTICS.select;
        assert!(select.contains("WHEN COUNT(t.id) = 0 THEN 0::numeric"));
        assert!(select.contains("ROUND("));
        assert!(select.contains("* 100 / COUNT(t.id),\n            2\n"));
        assert!(select.contains("LEFT JOIN tasks"));
    }

    #[test]
    fn test_ranking_uses_row_ordinal() {
        let select = GAMIFICATION_RANKING.select;
        assert!(select.contains("ROW_NUMBER() OVER"));
        assert!(!select.contains("DENSE_RANK"));
        assert!(select.contains("DESC"));
    }

    #[test]
    fn test_seed_sql_is_conflict_safe() {
        let sql = seed_challenges_sql();
        assert!(sql.ends_with("ON CONFLICT (name) DO NOTHING"));

        let names: HashSet<&str> = SEED_CHALLENGES.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), SEED_CHALLENGES.len(), "seed names must be unique");
        for challenge in SEED_CHALLENGES {
            assert_eq!(sql.matches(&format!("'{}'", challenge.name)).count(), 1);
            assert!(challenge.points_reward >= 0);
        }
    }

    #[test]
    fn test_challenge_types_match_check_constraint() {
        let sql = table("challenges").unwrap().sql;
        for kind in ChallengeType::ALL {
            assert!(sql.contains(&format!("'{kind}'")));
            assert_eq!(kind.as_str().parse::<ChallengeType>(), Ok(kind));
        }
        assert!("yearly".parse::<ChallengeType>().is_err());
    }

    #[test]
    fn test_enumerated_columns_are_checked() {
        let schedules = table("work_schedules").unwrap().sql;
        assert!(schedules.contains("CHECK (day_of_week BETWEEN 0 AND 6)"));

        let permissions = table("document_permissions").unwrap().sql;
        assert!(permissions.contains("CHECK (permission_level IN ('read', 'write', 'admin'))"));
        assert!(permissions.contains("UNIQUE (document_id, profile_id)"));

        let members = table("chat_members").unwrap().sql;
        assert!(members.contains("UNIQUE (channel_id, profile_id)"));

        let participations = table("challenge_participations").unwrap().sql;
        assert!(participations.contains("UNIQUE (challenge_id, profile_id)"));
    }

    #[test]
    fn test_money_is_fixed_point() {
        for name in ["employees", "projects", "budgets"] {
            let sql = table(name).unwrap().sql;
            assert!(sql.contains("NUMERIC(12, 2)"), "{name} money column");
            assert!(!sql.contains("currency"));
        }
    }

    #[test]
    fn test_schema_script_terminates_statements() {
        let script = schema_script();
        let statements = schema_statements();

        assert_eq!(script.matches("\n-- ").count(), statements.len());
        for statement in &statements {
            assert!(script.contains(&format!("{};\n", statement.sql)));
        }
        assert_eq!(script, schema_script(), "script must be deterministic");
    }
}
