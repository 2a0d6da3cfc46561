use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::core::capabilities::{HttpRequest, HttpTransport};
use crate::dsl::schema::HttpMethod;
use crate::error::StepError;

#[derive(Debug, Clone)]
pub struct HttpPoolConfig {
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
    pub default_timeout: Duration,
    pub tcp_keepalive: Option<Duration>,
    /// Treat non-2xx responses as step errors.
    pub fail_on_error_status: bool,
}

impl Default for HttpPoolConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: 10,
            pool_idle_timeout: Duration::from_secs(90),
            default_timeout: Duration::from_secs(30),
            tcp_keepalive: Some(Duration::from_secs(60)),
            fail_on_error_status: true,
        }
    }
}

/// [`HttpTransport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: HttpPoolConfig,
}

impl ReqwestTransport {
    pub fn new(config: HttpPoolConfig) -> Result<Self, StepError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(config.pool_idle_timeout)
            .tcp_keepalive(config.tcp_keepalive)
            .timeout(config.default_timeout)
            .build()
            .map_err(|e| StepError::NetworkError(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpPoolConfig {
        &self.config
    }

    fn header_map(request: &HttpRequest) -> Result<HeaderMap, StepError> {
        let mut headers = HeaderMap::new();
        for (key, value) in &request.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| StepError::NetworkError(format!("invalid header '{}': {}", key, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| StepError::NetworkError(format!("invalid header '{}': {}", key, e)))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<Value, StepError> {
        let headers = Self::header_map(request)?;
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Patch => self.client.patch(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };
        let builder = builder.headers(headers);
        // GET carries no body; a null body is omitted for every method.
        let builder = if request.method != HttpMethod::Get && !request.body.is_null() {
            builder.json(&request.body)
        } else {
            builder
        };

        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending http request");
        let resp = builder
            .send()
            .await
            .map_err(|e| StepError::NetworkError(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| StepError::NetworkError(e.to_string()))?;

        if self.config.fail_on_error_status && !status.is_success() {
            let preview: String = text.chars().take(512).collect();
            tracing::warn!(status = status.as_u16(), url = %request.url, "http request failed");
            return Err(StepError::HttpStatus {
                status: status.as_u16(),
                message: preview,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}
