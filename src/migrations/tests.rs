#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::core::shared::error::ApiError;
    use crate::core::shared::test_utils::{MockTool, TestAppStateBuilder};
    use crate::mcp::{ExternalTool, Method};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn request(name: &str, query: &str) -> MigrationRequest {
        MigrationRequest {
            name: Some(name.to_string()),
            query: Some(query.to_string()),
        }
    }

    async fn post(tool: Arc<MockTool>, body: &str) -> (StatusCode, Value) {
        let state = TestAppStateBuilder::new()
            .with_tool(tool as Arc<dyn ExternalTool>)
            .build();
        let app = configure_migration_routes().with_state(state);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/migrations")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_migration_name_accepted() {
        for name in ["create_tables", "add_index_2", "v1", "_", "0001"] {
            assert!(MigrationName::parse(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_migration_name_rejected() {
        for name in ["CreateTables", "add index", "drop-table", "x;y", "ação", ""] {
            assert!(
                matches!(MigrationName::parse(name), Err(ApiError::InvalidName(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_request_requires_both_fields() {
        let missing = MigrationRequest {
            name: Some("init".to_string()),
            query: None,
        };
        assert!(matches!(missing.validate(), Err(ApiError::Validation(_))));
        assert!(matches!(
            request("init", "   ").validate(),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            request("Init", "SELECT 1").validate(),
            Err(ApiError::InvalidName(_))
        ));
    }

    #[tokio::test]
    async fn test_apply_forwards_name_and_query() {
        let tool = MockTool::succeeding(json!({"rows": []}));
        let migration = request("init_schema", "SELECT 1").validate().unwrap();
        let response = apply_migration(&tool, migration).await;

        assert!(response.success);
        assert_eq!(response.method, Method::McpTool);
        assert_eq!(response.result, json!({"rows": []}));

        let calls = tool.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, APPLY_MIGRATION_OPERATION);
        assert_eq!(calls[0].1, json!({"name": "init_schema", "query": "SELECT 1"}));
    }

    #[tokio::test]
    async fn test_apply_simulates_on_failure() {
        let migration = request("init_schema", "SELECT 1").validate().unwrap();
        let response = apply_migration(&MockTool::failing(), migration).await;

        assert!(response.success);
        assert_eq!(response.method, Method::Simulated);
        assert_eq!(response.result["migration_applied"], "init_schema");
        assert_eq!(response.result["sql_executed"], "SELECT 1");
        assert!(response.result["warning"].is_string());
    }

    #[tokio::test]
    async fn test_apply_simulates_on_unparseable_output() {
        let migration = request("init_schema", "SELECT 1").validate().unwrap();
        let tool = MockTool::printing("Error: not logged in");
        let response = apply_migration(&tool, migration).await;
        assert_eq!(response.method, Method::Simulated);
    }

    #[tokio::test]
    async fn test_endpoint_success() {
        let tool = Arc::new(MockTool::succeeding(json!([])));
        let (status, body) =
            post(tool.clone(), r#"{"name": "add_tasks", "query": "SELECT 1"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["method"], "mcp_tool");
        assert_eq!(body["migration"], json!({"name": "add_tasks", "query": "SELECT 1"}));
        assert!(body["timestamp"].is_string());
        assert!(body["result"].get("warning").is_none());
        assert_eq!(tool.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_endpoint_simulated() {
        let tool = Arc::new(MockTool::failing());
        let (status, body) =
            post(tool.clone(), r#"{"name": "add_tasks", "query": "SELECT 1"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["method"], "simulated");
        assert!(body["result"]["warning"].is_string());
        assert!(body["result"]["note"].is_string());
    }

    #[tokio::test]
    async fn test_endpoint_invalid_name_skips_tool() {
        let tool = Arc::new(MockTool::succeeding(json!([])));
        let (status, body) =
            post(tool.clone(), r#"{"name": "Add Tasks", "query": "SELECT 1"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid migration name");
        assert!(tool.calls().is_empty());
    }

    #[tokio::test]
    async fn test_endpoint_missing_fields() {
        let tool = Arc::new(MockTool::succeeding(json!([])));
        let (status, body) = post(tool.clone(), r#"{"name": "add_tasks"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request");
        assert!(tool.calls().is_empty());
    }

    #[tokio::test]
    async fn test_endpoint_malformed_body() {
        let tool = Arc::new(MockTool::succeeding(json!([])));
        let (status, body) = post(tool.clone(), "{not json").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(body["details"].is_string());
        assert!(tool.calls().is_empty());
    }
}
