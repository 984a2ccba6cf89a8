//! Credential context
//!
//! The identity/scope bundle every directory request is authorized with.

use super::authenticator::Authenticator;
use super::types::ServiceAccountKey;
use crate::config::ModuleConfig;
use crate::error::Result;
use tracing::info;

/// Authenticated identity bound to one subject and one scope set
///
/// Built once at startup and handed to clients explicitly (usually inside
/// an `Arc`). Nothing about the identity changes after construction.
#[derive(Debug)]
pub struct CredentialContext {
    config: ModuleConfig,
    authenticator: Authenticator,
}

impl CredentialContext {
    /// Check the module's environment and build its credentials
    ///
    /// Fails with a configuration error before any network activity when a
    /// required variable is missing or the key file is unusable.
    pub fn from_env(module: &str, scopes: &[&str]) -> Result<Self> {
        let config = ModuleConfig::from_env(module)?;
        Self::from_config(config, scopes)
    }

    /// Build credentials from an already-resolved module configuration
    pub fn from_config(config: ModuleConfig, scopes: &[&str]) -> Result<Self> {
        let key = ServiceAccountKey::from_file(&config.service_account_file_path)?;
        Ok(Self::new(config, key, scopes))
    }

    /// Build credentials from a configuration and an in-memory key
    pub fn new(config: ModuleConfig, key: ServiceAccountKey, scopes: &[&str]) -> Self {
        let scopes = scopes.iter().map(|s| (*s).to_string()).collect();
        let mut authenticator =
            Authenticator::new(key, Some(config.google_user.clone()), scopes);
        if let Some(url) = &config.token_url {
            authenticator = authenticator.with_token_url(url.clone());
        }

        info!(
            module = %config.module,
            subject = %config.google_user,
            "Credentials initialized for {}",
            authenticator.client_email()
        );

        Self {
            config,
            authenticator,
        }
    }

    /// Module the credentials were configured for
    pub fn module(&self) -> &str {
        &self.config.module
    }

    /// Impersonated user
    pub fn subject(&self) -> &str {
        &self.config.google_user
    }

    /// Granted scopes
    pub fn scopes(&self) -> &[String] {
        self.authenticator.scopes()
    }

    /// Directory API root for this module
    pub fn api_base_url(&self) -> &str {
        &self.config.api_base_url
    }

    /// Token source used to authorize requests
    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }
}
