//! reqwest-backed gateway
//!
//! Builds the URL from percent-encoded path segments, attaches the bearer
//! token, sends exactly one request per call and classifies failures.

use super::call::{ApiCall, Gateway};
use super::throttle::{RequestThrottle, ThrottleConfig};
use crate::auth::CredentialContext;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Configuration for the HTTP gateway
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// API root all resource paths are appended to
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Throttle configuration (None disables throttling)
    pub throttle: Option<ThrottleConfig>,
    /// Headers sent with every request
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: crate::config::DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            throttle: Some(ThrottleConfig::default()),
            default_headers: HashMap::new(),
            user_agent: format!("admin-directory/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GatewayConfig {
    /// Create a new config builder
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }
}

/// Builder for gateway config
#[derive(Default)]
pub struct GatewayConfigBuilder {
    config: GatewayConfig,
}

impl GatewayConfigBuilder {
    /// Set the API root
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the throttle
    pub fn throttle(mut self, config: ThrottleConfig) -> Self {
        self.config.throttle = Some(config);
        self
    }

    /// Disable throttling
    pub fn no_throttle(mut self) -> Self {
        self.config.throttle = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> GatewayConfig {
        self.config
    }
}

/// Gateway that talks to the directory API over HTTPS
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
    credentials: Option<Arc<CredentialContext>>,
    throttle: Option<RequestThrottle>,
}

impl HttpGateway {
    /// Gateway for the credential context's API root with default settings
    pub fn new(credentials: Arc<CredentialContext>) -> Result<Self> {
        let config = GatewayConfig::builder()
            .base_url(credentials.api_base_url())
            .build();
        Self::with_config(config, Some(credentials))
    }

    /// Gateway with explicit settings
    ///
    /// Without credentials requests are sent unauthenticated.
    pub fn with_config(
        config: GatewayConfig,
        credentials: Option<Arc<CredentialContext>>,
    ) -> Result<Self> {
        // Reject unusable roots before the first call
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let throttle = config.throttle.map(RequestThrottle::new);

        Ok(Self {
            client,
            config,
            credentials,
            throttle,
        })
    }

    /// Gateway settings
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Report a client-side timeout as such, keeping other failures as they are
    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_ms: u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            Error::Http(err)
        }
    }

    /// Full URL for a call, segments percent-encoded
    pub fn build_url(&self, call: &ApiCall) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::config(format!("Invalid API root: {}", self.config.base_url)))?;
            segments.pop_if_empty();
            segments.extend(call.segments.iter().map(String::as_str));
        }
        if !call.query.is_empty() {
            url.query_pairs_mut().extend_pairs(call.query.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn execute(&self, call: &ApiCall) -> Result<Value> {
        let url = self.build_url(call)?;

        if let Some(throttle) = &self.throttle {
            throttle.acquire().await;
        }

        let mut req = self.client.request(call.verb.into(), url.clone());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if call.verb.has_body() {
            let body = call.body.clone().unwrap_or_else(|| Value::Object(Default::default()));
            req = req.json(&body);
        }

        // The token exchange shares this client's timeout
        if let Some(credentials) = &self.credentials {
            req = credentials
                .authenticator()
                .apply(&self.client, req)
                .await
                .map_err(|e| match e {
                    Error::Http(inner) => self.transport_error(inner),
                    other => other,
                })?;
        }

        let response = req.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            debug!("{} {} failed with {}", call.verb, call.path(), status.as_u16());
            return Err(Error::from_status(status.as_u16(), text));
        }

        debug!("{} {} -> {}", call.verb, call.path(), status.as_u16());

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| Error::malformed("body", format!("response is not valid JSON: {e}")))
    }
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("config", &self.config)
            .field("has_credentials", &self.credentials.is_some())
            .field("has_throttle", &self.throttle.is_some())
            .finish_non_exhaustive()
    }
}
