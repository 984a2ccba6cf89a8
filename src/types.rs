//! Common types used throughout the crate
//!
//! Shared aliases, the request verb enum and the empty-string helper used
//! when reading configuration.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// Verb of a directory API call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    /// Read a resource or collection
    #[default]
    GET,
    /// Create a resource
    POST,
    /// Change some attributes of a resource
    PATCH,
    /// Remove a resource
    DELETE,
}

impl Verb {
    /// Whether calls with this verb carry a JSON body
    pub fn has_body(self) -> bool {
        matches!(self, Verb::POST | Verb::PATCH)
    }
}

impl From<Verb> for reqwest::Method {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::GET => reqwest::Method::GET,
            Verb::POST => reqwest::Method::POST,
            Verb::PATCH => reqwest::Method::PATCH,
            Verb::DELETE => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Verb::GET => "GET",
            Verb::POST => "POST",
            Verb::PATCH => "PATCH",
            Verb::DELETE => "DELETE",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Treat empty configuration values as unset
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}
