//! Pagination types and traits

use crate::error::Result;
use crate::http::ApiCall;
use crate::record::Record;
use serde_json::Value;

/// Result of inspecting a page for a continuation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages exist; request the next one with this token
    Continue {
        /// Continuation token returned by the page
        token: String,
    },
    /// This was the last page
    Done,
}

impl NextPage {
    /// Create a continuation
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::Continue {
            token: token.into(),
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Records of one page plus what comes after it
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutcome {
    /// Records in page order
    pub records: Vec<Record>,
    /// Continuation
    pub next: NextPage,
}

/// Tracks progress through one list query
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages received so far
    pub pages: u32,
    /// Records received so far
    pub total_fetched: u64,
    /// Token to send with the next request
    pub token: Option<String>,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a received page
    pub fn add_page(&mut self, records: usize) {
        self.pages += 1;
        self.total_fetched += records as u64;
    }

    /// Set the token for the next request
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.token = None;
        self.done = true;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Put the state's continuation on the next call
    ///
    /// Called before every request; on the first request the state carries
    /// no token and the call goes out as the caller built it.
    fn prepare(&self, call: &mut ApiCall, state: &PaginationState);

    /// Split a decoded page into records and continuation
    fn process_response(&self, body: Value, state: &mut PaginationState) -> Result<PageOutcome>;
}
