use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::config::AppConfig;
use crate::error::{ClientError, ClientResult};

/// JSON-over-HTTP seam between the client logic and the backend.
///
/// Both methods resolve to the decoded response body regardless of the HTTP
/// status: the backend reports application failures inside 200/4xx JSON
/// bodies and callers decide what a body means. Only transport failures and
/// non-JSON bodies are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, bearer: Option<&str>) -> ClientResult<Value>;

    async fn post(&self, path: &str, body: Option<&Value>) -> ClientResult<Value>;
}

/// reqwest-backed transport rooted at the backend base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    log_requests: bool,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ClientResult<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            log_requests: true,
        })
    }

    pub fn from_config(config: &AppConfig) -> ClientResult<Self> {
        let mut transport = Self::new(&config.api.base_url, config.api.request_timeout())?;
        transport.log_requests = config.api.enable_request_logging;
        Ok(transport)
    }

    /// Resolve an absolute API path (`/api/users`) against the base URL
    pub fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn decode(&self, method: &str, url: &Url, response: reqwest::Response) -> ClientResult<Value> {
        let status = response.status();
        let text = response.text().await?;

        if self.log_requests {
            tracing::debug!("{} {} -> {}", method, url, status);
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("{} {} returned a non-JSON body ({}): {}", method, url, status, e);
            ClientError::invalid_json(format!("{} {}: {}", method, url.path(), e))
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, bearer: Option<&str>) -> ClientResult<Value> {
        let url = self.endpoint(path)?;
        let mut request = self.client.get(url.clone());
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("GET {} failed: {}", url, e);
            ClientError::from(e)
        })?;

        self.decode("GET", &url, response).await
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> ClientResult<Value> {
        let url = self.endpoint(path)?;
        let mut request = self.client.post(url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("POST {} failed: {}", url, e);
            ClientError::from(e)
        })?;

        self.decode("POST", &url, response).await
    }
}
