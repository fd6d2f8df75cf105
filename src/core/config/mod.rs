use std::collections::HashMap;

pub const DEFAULT_PROJECT_REF: &str = "bizdash-demo";
pub const DEFAULT_TOOL_BIN: &str = "mcp";
pub const DEFAULT_TOOL_SERVER: &str = "supabase";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub tool: ToolConfig,
    pub server: ServerConfig,
    pub database_url: Option<String>,
}

/// Connection details for the managed backend.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    pub project_ref: String,
}

/// How the external MCP tool is launched.
#[derive(Clone, Debug)]
pub struct ToolConfig {
    pub bin: String,
    pub server: String,
    pub access_token: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Builds the configuration from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let url = get("BACKEND_URL").ok_or(ConfigError::Missing("BACKEND_URL"))?;
        let anon_key = get("BACKEND_ANON_KEY").ok_or(ConfigError::Missing("BACKEND_ANON_KEY"))?;

        let port = match get("SERVER_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "SERVER_PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            backend: BackendConfig {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
                project_ref: get("BACKEND_PROJECT_REF")
                    .unwrap_or_else(|| DEFAULT_PROJECT_REF.to_string()),
            },
            tool: ToolConfig {
                bin: get("MCP_TOOL_BIN").unwrap_or_else(|| DEFAULT_TOOL_BIN.to_string()),
                server: get("MCP_SERVER").unwrap_or_else(|| DEFAULT_TOOL_SERVER.to_string()),
                access_token: get("MCP_ACCESS_TOKEN"),
            },
            server: ServerConfig {
                host: get("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
            },
            database_url: get("DATABASE_URL"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let err = AppConfig::from_vars(&vars(&[("BACKEND_ANON_KEY", "k")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("BACKEND_URL"));

        let err = AppConfig::from_vars(&vars(&[("BACKEND_URL", "http://x")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("BACKEND_ANON_KEY"));

        let err = AppConfig::from_vars(&vars(&[("BACKEND_URL", " "), ("BACKEND_ANON_KEY", "k")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("BACKEND_URL"));
    }

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_vars(&vars(&[
            ("BACKEND_URL", "https://abc.supabase.co/"),
            ("BACKEND_ANON_KEY", "anon"),
        ]))
        .unwrap();

        assert_eq!(config.backend.url, "https://abc.supabase.co");
        assert_eq!(config.backend.project_ref, DEFAULT_PROJECT_REF);
        assert_eq!(config.tool.bin, DEFAULT_TOOL_BIN);
        assert_eq!(config.tool.server, DEFAULT_TOOL_SERVER);
        assert!(config.tool.access_token.is_none());
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_overrides_and_invalid_port() {
        let config = AppConfig::from_vars(&vars(&[
            ("BACKEND_URL", "http://localhost:54321"),
            ("BACKEND_ANON_KEY", "anon"),
            ("BACKEND_PROJECT_REF", "acme"),
            ("MCP_TOOL_BIN", "mcp-cli"),
            ("SERVER_PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(config.backend.project_ref, "acme");
        assert_eq!(config.tool.bin, "mcp-cli");
        assert_eq!(config.server.port, 9000);

        let err = AppConfig::from_vars(&vars(&[
            ("BACKEND_URL", "http://localhost:54321"),
            ("BACKEND_ANON_KEY", "anon"),
            ("SERVER_PORT", "ninety"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SERVER_PORT", .. }));
    }
}
