//! Page-token pagination
//!
//! The pattern used across Google's REST APIs:
//!
//! ```text
//! GET .../members?maxResults=2
//! { "members": [...], "nextPageToken": "abc" }
//! GET .../members?maxResults=2&pageToken=abc
//! { "members": [...] }
//! ```
//!
//! The walk ends when a page's token is absent, `null` or an empty string.
//! A page with an empty record list but a non-empty token still continues.

use super::types::{NextPage, PageOutcome, PaginationState, Paginator};
use crate::error::{Error, Result};
use crate::http::ApiCall;
use crate::record::{json_kind, Record};
use serde_json::Value;

/// Page-token paginator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPaginator {
    /// Query parameter that carries the token on requests
    pub token_param: String,
    /// Response field holding the next token
    pub token_field: String,
    /// Response field holding the page's records
    pub records_field: String,
}

impl TokenPaginator {
    /// Create a paginator
    pub fn new(
        token_param: impl Into<String>,
        token_field: impl Into<String>,
        records_field: impl Into<String>,
    ) -> Self {
        Self {
            token_param: token_param.into(),
            token_field: token_field.into(),
            records_field: records_field.into(),
        }
    }

    /// Google-style `pageToken` / `nextPageToken` paginator for a records field
    pub fn google(records_field: impl Into<String>) -> Self {
        Self::new("pageToken", "nextPageToken", records_field)
    }

    fn read_records(&self, value: Option<Value>) -> Result<Vec<Record>> {
        match value {
            // Empty collections omit the field entirely
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| Record::from_value(item, &format!("{}[{i}]", self.records_field)))
                .collect(),
            Some(other) => Err(Error::malformed(
                &self.records_field,
                format!("expected an array of records, found {}", json_kind(&other)),
            )),
        }
    }

    fn read_next(&self, value: Option<&Value>) -> Result<NextPage> {
        match value {
            None | Some(Value::Null) => Ok(NextPage::Done),
            // An empty token would restart from the first page
            Some(Value::String(token)) if token.is_empty() => Ok(NextPage::Done),
            Some(Value::String(token)) => Ok(NextPage::with_token(token.clone())),
            Some(other) => Err(Error::malformed(
                &self.token_field,
                format!("expected a string token, found {}", json_kind(other)),
            )),
        }
    }
}

impl Paginator for TokenPaginator {
    fn prepare(&self, call: &mut ApiCall, state: &PaginationState) {
        if let Some(token) = &state.token {
            call.set_query(&self.token_param, token.clone());
        }
    }

    fn process_response(&self, body: Value, state: &mut PaginationState) -> Result<PageOutcome> {
        let Value::Object(mut page) = body else {
            return Err(Error::malformed(
                "$",
                format!("expected a JSON object page, found {}", json_kind(&body)),
            ));
        };

        let next = self.read_next(page.get(&self.token_field))?;
        let records = self.read_records(page.remove(&self.records_field))?;

        state.add_page(records.len());
        match &next {
            NextPage::Continue { token } => state.set_token(token.clone()),
            NextPage::Done => state.mark_done(),
        }

        Ok(PageOutcome { records, next })
    }
}
