//! Authentication module
//!
//! Service-account credentials for the directory API. A
//! [`CredentialContext`] is built once at startup from the module's
//! environment configuration and shared (read-only) by every client.
//! Its [`Authenticator`] exchanges a signed JWT assertion for an access
//! token and caches it until shortly before expiry.

mod authenticator;
mod context;
mod types;

pub use authenticator::{Authenticator, JWT_BEARER_GRANT};
pub use context::CredentialContext;
pub use types::{CachedToken, ServiceAccountKey};
