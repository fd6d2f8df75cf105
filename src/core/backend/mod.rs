//! HTTP client for the managed backend.
//!
//! The backend exposes a PostgREST-style surface: relations are read with
//! `GET /rest/v1/<relation>` and SQL functions are called through
//! `POST /rest/v1/rpc/<function>`. One client is built at startup and shared
//! through `AppState`.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

use crate::core::config::BackendConfig;
use crate::core::urls::BackendUrls;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("Backend returned {status} for {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("Invalid relation name: {0}")]
    InvalidRelation(String),
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    anon_key: String,
    project_ref: String,
    http_client: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| BackendError::Client(e.to_string()))?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            project_ref: config.project_ref.clone(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn project_ref(&self) -> &str {
        &self.project_ref
    }

    fn relation_url(&self, relation: &str) -> Result<String, BackendError> {
        if relation.is_empty()
            || !relation
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(BackendError::InvalidRelation(relation.to_string()));
        }
        Ok(format!("{}{}/{relation}", self.base_url, BackendUrls::REST))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn send(
        &self,
        url: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<String, BackendError> {
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| BackendError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| BackendError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(BackendError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    /// Reads every row of a table or view.
    pub async fn select_all<T: DeserializeOwned>(
        &self,
        relation: &str,
    ) -> Result<Vec<T>, BackendError> {
        let url = self.relation_url(relation)?;
        let builder = self
            .http_client
            .get(&url)
            .query(&[("select", "*")]);
        let body = self.send(&url, builder).await?;

        serde_json::from_str(&body).map_err(|e| BackendError::Decode {
            url,
            message: e.to_string(),
        })
    }

    /// Cheapest possible read against a relation; used for latency checks.
    pub async fn ping(&self, relation: &str) -> Result<(), BackendError> {
        let url = self.relation_url(relation)?;
        let builder = self
            .http_client
            .get(&url)
            .query(&[("select", "id"), ("limit", "1")]);
        self.send(&url, builder).await.map(|_| ())
    }

    /// Submits an opaque SQL string to the backend's `exec_sql` function.
    ///
    /// Execution is all-or-nothing from the caller's side: the backend does
    /// not report per-statement results.
    pub async fn exec_sql(&self, query: &str) -> Result<Value, BackendError> {
        let url = format!("{}{}", self.base_url, BackendUrls::RPC_EXEC_SQL);
        let builder = self
            .http_client
            .post(&url)
            .json(&json!({ "query": query }));
        let body = self.send(&url, builder).await?;

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| BackendError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> BackendClient {
        BackendClient::new(&BackendConfig {
            url: server.url(),
            anon_key: "anon-key".to_string(),
            project_ref: "test".to_string(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_select_all_sends_auth_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/project_statistics")
            .match_query(Matcher::UrlEncoded("select".into(), "*".into()))
            .match_header("apikey", "anon-key")
            .match_header("authorization", "Bearer anon-key")
            .with_status(200)
            .with_body(r#"[{"id": 1}, {"id": 2}]"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let rows: Vec<Value> = client.select_all("project_statistics").await.unwrap();

        assert_eq!(rows.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_status_error_carries_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/rest/v1/profiles")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("invalid api key")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.select_all::<Value>("profiles").await.unwrap_err();

        match err {
            BackendError::Status { status, body, .. } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_exec_sql_posts_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/rpc/exec_sql")
            .match_body(Matcher::Json(json!({ "query": "SELECT 1" })))
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.exec_sql("SELECT 1").await.unwrap();

        assert_eq!(result, Value::Null);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_relation_name_rejected() {
        let server = mockito::Server::new_async().await;
        let client = client_for(&server);

        let err = client.ping("profiles?select=*").await.unwrap_err();
        assert!(matches!(err, BackendError::InvalidRelation(_)));
    }
}
