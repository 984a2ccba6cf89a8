//! Remote API gateway
//!
//! The boundary between the directory client and the network. A
//! [`Gateway`] takes an [`ApiCall`] (verb, resource path, parameters and an
//! optional body) and returns the decoded JSON response, or the error that
//! stopped it. The client never looks at status codes; it only inspects
//! the decoded value.
//!
//! [`HttpGateway`] is the production implementation: reqwest with bearer
//! tokens from a [`CredentialContext`](crate::auth::CredentialContext) and an
//! optional token-bucket throttle. It performs no retries.

mod call;
mod client;
mod throttle;

pub use call::{ApiCall, Gateway};
pub use client::{GatewayConfig, HttpGateway};
pub use throttle::{RequestThrottle, ThrottleConfig};

#[cfg(test)]
pub(crate) mod scripted;
