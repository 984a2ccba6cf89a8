//! Gateway trait and the call description it executes

use crate::error::Result;
use crate::types::Verb;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// One request against the remote API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    /// Request verb
    pub verb: Verb,
    /// Resource path segments below the API root (unencoded)
    pub segments: Vec<String>,
    /// Query parameters, in insertion order
    pub query: Vec<(String, String)>,
    /// JSON body for POST/PATCH
    pub body: Option<Value>,
}

impl ApiCall {
    /// Create a call for the given verb and resource path
    pub fn new<I, S>(verb: Verb, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            verb,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    /// GET call
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Verb::GET, segments)
    }

    /// POST call
    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Verb::POST, segments)
    }

    /// PATCH call
    pub fn patch<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Verb::PATCH, segments)
    }

    /// DELETE call
    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Verb::DELETE, segments)
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a query parameter when a value is present
    #[must_use]
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Set or replace a query parameter, keeping its position
    pub fn set_query(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.query.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.query.push((key.to_string(), value)),
        }
    }

    /// Look up a query parameter
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set the JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Resource path for logging (`groups/g@example.com/members`)
    pub fn path(&self) -> String {
        self.segments.join("/")
    }
}

/// Executes API calls and returns decoded JSON
///
/// Implementations surface authorization and transport failures as errors;
/// an empty success body decodes to `Value::Null`.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Execute one call
    async fn execute(&self, call: &ApiCall) -> Result<Value>;
}

#[async_trait]
impl<G: Gateway + ?Sized> Gateway for Arc<G> {
    async fn execute(&self, call: &ApiCall) -> Result<Value> {
        (**self).execute(call).await
    }
}

#[async_trait]
impl<G: Gateway + ?Sized> Gateway for &G {
    async fn execute(&self, call: &ApiCall) -> Result<Value> {
        (**self).execute(call).await
    }
}
