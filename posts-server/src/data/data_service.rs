use crate::domain::DomainError;
use async_trait::async_trait;
use reqwest::{header, Client, Method};
use serde_json::Value;

/// Status and body of a data service response, passed back untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait DataService: Send + Sync {
    /// Issues one request against the data service. Only network failures
    /// are errors; every HTTP status is returned as data.
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<UpstreamResponse, DomainError>;
}

/// PostgREST (Supabase REST) implementation of [`DataService`].
pub struct PostgrestClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl PostgrestClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, DomainError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl DataService for PostgrestClient {
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<UpstreamResponse, DomainError> {
        let url = self.url(path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(header::ACCEPT, "application/json");

        // Only writes carry a body; asking for the representation on DELETE
        // would turn the expected 204 into a 200.
        if let Some(body) = body {
            request = request
                .header("Prefer", "return=representation")
                .json(&body);
        }

        tracing::debug!("Calling data service: {} {}", method, url);

        let response = request.send().await.map_err(|e| {
            tracing::error!("Data service request {} {} failed: {}", method, url, e);
            DomainError::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read data service response body: {}", e);
            DomainError::from(e)
        })?;

        tracing::debug!("Data service answered {} {} with {}", method, url, status);

        Ok(UpstreamResponse { status, body })
    }
}
