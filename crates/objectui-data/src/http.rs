//! HTTP implementation of the URL fetcher, built on reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::error::{FetchError, Result};
use crate::fetcher::{UrlFetcher, UrlRequest};

/// Builder for [`HttpUrlFetcher`].
pub struct HttpUrlFetcherBuilder {
    timeout: Duration,
    user_agent: String,
    base_url: Option<Url>,
}

impl Default for HttpUrlFetcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpUrlFetcherBuilder {
    /// A builder with default configuration.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("ObjectUI/{} (Rust)", env!("CARGO_PKG_VERSION")),
            base_url: None,
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Resolve relative request URLs against a base.
    pub fn base_url(mut self, base: Url) -> Self {
        self.base_url = Some(base);
        self
    }

    /// Build the fetcher.
    pub fn build(self) -> Result<HttpUrlFetcher> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(HttpUrlFetcher {
            client,
            base_url: self.base_url,
        })
    }
}

/// [`UrlFetcher`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpUrlFetcher {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl HttpUrlFetcher {
    /// A fetcher with default configuration.
    pub fn new() -> Result<Self> {
        HttpUrlFetcherBuilder::new().build()
    }

    /// Start building a customized fetcher.
    pub fn builder() -> HttpUrlFetcherBuilder {
        HttpUrlFetcherBuilder::new()
    }

    fn resolve_url(&self, raw: &str) -> Result<Url> {
        let parsed = match &self.base_url {
            Some(base) => base.join(raw),
            None => Url::parse(raw),
        };
        parsed.map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))
    }
}

#[async_trait]
impl UrlFetcher for HttpUrlFetcher {
    async fn fetch_url(&self, request: &UrlRequest) -> Result<Value> {
        let url = self.resolve_url(&request.url)?;
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| FetchError::Request(format!("invalid method '{}'", request.method)))?;

        tracing::debug!(
            target: "objectui_data::http",
            %url,
            method = %method,
            "issuing data-source request"
        );

        let mut builder = self.client.request(method, url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.ok().filter(|t| !t.is_empty());
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}
