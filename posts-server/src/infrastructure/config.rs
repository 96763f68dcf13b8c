//! Process configuration read from the environment.

use anyhow::{bail, Context, Result};

const SUPABASE_REST_SUFFIX: &str = "/rest/v1";

#[derive(Debug, Clone, PartialEq)]
pub struct DataServiceConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub http_host: String,
    pub http_port: u16,
    pub data_service: DataServiceConfig,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base_url = match (get("POSTGREST_URL"), get("SUPABASE_URL")) {
            (Some(url), _) => url,
            (None, Some(project_url)) => format!(
                "{}{}",
                project_url.trim_end_matches('/'),
                SUPABASE_REST_SUFFIX
            ),
            (None, None) => bail!("POSTGREST_URL or SUPABASE_URL must be set"),
        };

        let api_key = get("POSTGREST_API_KEY")
            .or_else(|| get("SUPABASE_KEY"))
            .context("POSTGREST_API_KEY or SUPABASE_KEY must be set")?;

        let http_port = match get("HTTP_PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("HTTP_PORT is not a valid port: {}", port))?,
            None => 8080,
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            http_host: get("HTTP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            http_port,
            data_service: DataServiceConfig { base_url, api_key },
            cors_allowed_origins,
        })
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
