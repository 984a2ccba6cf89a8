//! Authenticator implementation
//!
//! Signs a JWT assertion with the service-account key, exchanges it for an
//! access token and applies that token to outgoing requests.
//!
//! Token requests go through the caller's HTTP client, so the exchange is
//! bound by the same timeout and user agent as the request it authorizes.

use super::types::{CachedToken, ServiceAccountKey};
use crate::config::DEFAULT_TOKEN_URL;
use crate::error::{Error, Result};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// OAuth2 grant type for JWT bearer assertions (RFC 7523)
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime accepted by Google's token endpoint
const ASSERTION_LIFETIME_SECONDS: i64 = 3600;

/// Authenticator for one service account, subject and scope set
pub struct Authenticator {
    key: ServiceAccountKey,
    /// Impersonated user (JWT `sub`)
    subject: Option<String>,
    scopes: Vec<String>,
    token_url: String,
    /// Cached access token
    cached_token: Arc<RwLock<Option<CachedToken>>>,
}

impl Authenticator {
    /// Create a new authenticator
    ///
    /// The token endpoint is taken from the key file when it names one.
    pub fn new(key: ServiceAccountKey, subject: Option<String>, scopes: Vec<String>) -> Self {
        let token_url = key
            .token_uri
            .clone()
            .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());
        Self {
            key,
            subject,
            scopes,
            token_url,
            cached_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Override the token endpoint
    #[must_use]
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Apply the bearer token to a request builder
    ///
    /// A missing or expired token is fetched with `client` first.
    pub async fn apply(&self, client: &Client, req: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.access_token(client).await?;
        Ok(req.bearer_auth(token))
    }

    /// Get a valid access token, refreshing through `client` if necessary
    pub async fn access_token(&self, client: &Client) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_new_token(client).await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Sign an assertion and exchange it at the token endpoint
    async fn fetch_new_token(&self, client: &Client) -> Result<CachedToken> {
        let assertion = self.sign_assertion()?;
        debug!(
            "Requesting access token for {} from {}",
            self.key.client_email, self.token_url
        );

        let form = [("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)];

        let response = client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenExchange {
                message: format!("Token request failed with status {status}: {body}"),
            });
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        Ok(token_response.into_cached_token())
    }

    /// Build the signed JWT assertion
    pub fn sign_assertion(&self) -> Result<String> {
        let now = Utc::now().timestamp();

        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            sub: self.subject.clone(),
            scope: self.scopes.join(" "),
            aud: self.token_url.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECONDS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid.clone_from(&self.key.private_key_id);

        let encoding_key =
            EncodingKey::from_rsa_pem(self.key.private_key.as_bytes()).map_err(|e| {
                Error::JwtGeneration {
                    message: format!("Invalid private key: {e}"),
                }
            })?;

        encode(&header, &claims, &encoding_key).map_err(|e| Error::JwtGeneration {
            message: format!("Failed to encode JWT: {e}"),
        })
    }

    /// Service account identity
    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Impersonated user, if any
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Requested scopes
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Token endpoint in use
    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("client_email", &self.key.client_email)
            .field("subject", &self.subject)
            .field("scopes", &self.scopes)
            .field("token_url", &self.token_url)
            .finish_non_exhaustive()
    }
}

/// OAuth2 token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_cached_token(self) -> CachedToken {
        match self.expires_in {
            Some(secs) => CachedToken::expires_in(self.access_token, secs),
            None => CachedToken::new(self.access_token, None),
        }
    }
}

/// Claims of a service-account assertion
#[derive(Debug, Serialize)]
struct AssertionClaims {
    iss: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}
