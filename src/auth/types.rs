//! Credential types
//!
//! The service-account key file format and the cached access token.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;

/// Service-account key as downloaded from the cloud console (JSON)
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Key kind; `service_account` when present
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    /// Owning project
    #[serde(default)]
    pub project_id: Option<String>,
    /// Key identifier, sent as the JWT `kid` header
    #[serde(default)]
    pub private_key_id: Option<String>,
    /// PEM-encoded RSA private key
    pub private_key: String,
    /// Service account identity (JWT `iss` claim)
    pub client_email: String,
    /// Token endpoint advertised by the key file
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl ServiceAccountKey {
    /// Parse a key from its JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let key: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid service account key: {e}")))?;

        if let Some(kind) = key.key_type.as_deref() {
            if kind != "service_account" {
                return Err(Error::config(format!(
                    "Expected a service_account key, found type '{kind}'"
                )));
            }
        }
        if key.client_email.is_empty() {
            return Err(Error::config("Service account key has an empty client_email"));
        }

        Ok(key)
    }

    /// Load a key from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read service account file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content)
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}
