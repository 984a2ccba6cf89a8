//! Environment configuration for an integration module
//!
//! Each integration is configured through environment variables prefixed
//! with its module name (e.g. `admin_directory`):
//!
//! | Variable                                | Required | Meaning                               |
//! |-----------------------------------------|----------|---------------------------------------|
//! | `<module>_service_account_file_path`    | yes      | Path to the service-account JSON key  |
//! | `<module>_google_user`                  | yes      | User the service account impersonates |
//! | `<module>_api_base_url`                 | no       | Override of the directory API root    |
//! | `<module>_token_url`                    | no       | Override of the OAuth2 token endpoint |
//!
//! Empty values are treated the same as unset ones.

use crate::error::{Error, Result};
use crate::types::OptionStringExt;
use std::path::PathBuf;

/// Module name used by the group-membership integration
pub const DEFAULT_MODULE: &str = "admin_directory";

/// Root of the Directory API v1
pub const DEFAULT_API_BASE_URL: &str = "https://admin.googleapis.com/admin/directory/v1";

/// Google's OAuth2 token endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Scope required to manage group memberships
pub const GROUP_SCOPE: &str = "https://www.googleapis.com/auth/admin.directory.group";

const SERVICE_ACCOUNT_FILE_PATH: &str = "service_account_file_path";
const GOOGLE_USER: &str = "google_user";
const API_BASE_URL: &str = "api_base_url";
const TOKEN_URL: &str = "token_url";

// ============================================================================
// Module Config
// ============================================================================

/// Settings for one integration module, resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleConfig {
    /// Module name the variables were read for
    pub module: String,
    /// Path to the service-account key file
    pub service_account_file_path: PathBuf,
    /// Identity to impersonate (JWT `sub` claim)
    pub google_user: String,
    /// Directory API root
    pub api_base_url: String,
    /// Token endpoint override (falls back to the key file's `token_uri`)
    pub token_url: Option<String>,
}

impl ModuleConfig {
    /// Read the configuration for `module` from the process environment
    pub fn from_env(module: &str) -> Result<Self> {
        Self::from_lookup(module, |name| std::env::var(name).ok())
    }

    /// Read the configuration for `module` through an arbitrary lookup
    ///
    /// Required variables are checked in a fixed order (key file first,
    /// then the impersonated user) so the reported error is deterministic.
    pub fn from_lookup<F>(module: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if module.is_empty() {
            return Err(Error::config("Module name must not be empty"));
        }

        let read = |suffix: &str| lookup(&Self::var_name(module, suffix)).none_if_empty();

        let service_account_file_path = read(SERVICE_ACCOUNT_FILE_PATH).ok_or_else(|| {
            Error::missing_env(
                Self::var_name(module, SERVICE_ACCOUNT_FILE_PATH),
                "path to your service account JSON file",
            )
        })?;

        let google_user = read(GOOGLE_USER).ok_or_else(|| {
            Error::missing_env(
                Self::var_name(module, GOOGLE_USER),
                "email address of the user making requests",
            )
        })?;

        let api_base_url =
            read(API_BASE_URL).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Ok(Self {
            module: module.to_string(),
            service_account_file_path: PathBuf::from(service_account_file_path),
            google_user,
            api_base_url,
            token_url: read(TOKEN_URL),
        })
    }

    /// Name of the environment variable `<module>_<suffix>`
    pub fn var_name(module: &str, suffix: &str) -> String {
        format!("{module}_{suffix}")
    }
}
