//! Member resource types

use crate::error::{Error, Result};
use crate::http::ApiCall;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest page the directory API serves for members
pub const MAX_PAGE_SIZE: u32 = 200;

// ============================================================================
// Enums
// ============================================================================

/// A member's role in a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    /// Full control of the group
    Owner,
    /// Manages members and settings
    Manager,
    /// Regular member
    Member,
}

impl MemberRole {
    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            MemberRole::Owner => "OWNER",
            MemberRole::Manager => "MANAGER",
            MemberRole::Member => "MEMBER",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "OWNER" => Ok(MemberRole::Owner),
            "MANAGER" => Ok(MemberRole::Manager),
            "MEMBER" => Ok(MemberRole::Member),
            _ => Err(Error::invalid_argument(
                "role",
                format!("unknown role '{s}' (expected OWNER, MANAGER or MEMBER)"),
            )),
        }
    }
}

/// How group mail reaches a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliverySettings {
    /// Every message as it arrives
    AllMail,
    /// One daily summary
    Daily,
    /// Bundled digest messages
    Digest,
    /// Mail is turned off
    Disabled,
    /// No delivery preference set
    None,
}

impl DeliverySettings {
    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            DeliverySettings::AllMail => "ALL_MAIL",
            DeliverySettings::Daily => "DAILY",
            DeliverySettings::Digest => "DIGEST",
            DeliverySettings::Disabled => "DISABLED",
            DeliverySettings::None => "NONE",
        }
    }
}

impl fmt::Display for DeliverySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliverySettings {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "ALL_MAIL" => Ok(DeliverySettings::AllMail),
            "DAILY" => Ok(DeliverySettings::Daily),
            "DIGEST" => Ok(DeliverySettings::Digest),
            "DISABLED" => Ok(DeliverySettings::Disabled),
            "NONE" => Ok(DeliverySettings::None),
            _ => Err(Error::invalid_argument(
                "delivery_settings",
                format!("unknown delivery setting '{s}'"),
            )),
        }
    }
}

// ============================================================================
// Request bodies and options
// ============================================================================

/// Writable member attributes
///
/// Only the attributes that are set end up in a request body, so an update
/// touches exactly the fields the caller supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAttributes {
    /// Member's email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Role in the group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,

    /// Mail delivery preference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_settings: Option<DeliverySettings>,

    /// Entity tag of the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl MemberAttributes {
    /// Empty attribute set
    pub fn new() -> Self {
        Self::default()
    }

    /// Member email address
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Role in the group
    #[must_use]
    pub fn role(mut self, role: MemberRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Mail delivery preference
    #[must_use]
    pub fn delivery_settings(mut self, settings: DeliverySettings) -> Self {
        self.delivery_settings = Some(settings);
        self
    }

    /// Entity tag sent back with an update
    #[must_use]
    pub fn etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    /// True when no attribute is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Filters and paging options for listing a group's members
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListMembersOptions {
    /// Page to start from
    pub page_token: Option<String>,
    /// Page size requested from the API
    pub max_results: Option<u32>,
    /// Only members holding one of these roles
    pub roles: Vec<MemberRole>,
    /// Include members reached through nested groups
    pub include_derived_membership: Option<bool>,
}

impl ListMembersOptions {
    /// No filters, server-side page size
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from this page instead of the first
    #[must_use]
    pub fn page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }

    /// Page size requested from the API (1 to 200)
    #[must_use]
    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Add a role filter; repeating a role has no effect
    ///
    /// ```
    /// use admin_directory::{ListMembersOptions, MemberRole};
    ///
    /// let options = ListMembersOptions::new()
    ///     .role(MemberRole::Owner)
    ///     .role(MemberRole::Manager)
    ///     .role(MemberRole::Owner)
    ///     .max_results(50);
    /// assert_eq!(options.roles, vec![MemberRole::Owner, MemberRole::Manager]);
    /// assert_eq!(options.max_results, Some(50));
    /// ```
    #[must_use]
    pub fn role(mut self, role: MemberRole) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    /// Include members reached through nested groups
    #[must_use]
    pub fn include_derived_membership(mut self, include: bool) -> Self {
        self.include_derived_membership = Some(include);
        self
    }

    /// Check option values against what the API accepts
    pub fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_results {
            if max == 0 || max > MAX_PAGE_SIZE {
                return Err(Error::invalid_argument(
                    "max_results",
                    format!("must be between 1 and {MAX_PAGE_SIZE}, got {max}"),
                ));
            }
        }
        if matches!(&self.page_token, Some(token) if token.is_empty()) {
            return Err(Error::invalid_argument("page_token", "must not be empty"));
        }
        Ok(())
    }

    /// Add the options as query parameters
    pub fn apply(&self, call: ApiCall) -> ApiCall {
        let roles = (!self.roles.is_empty()).then(|| {
            self.roles
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(",")
        });

        call.query_opt("pageToken", self.page_token.clone())
            .query_opt("maxResults", self.max_results.map(|n| n.to_string()))
            .query_opt("roles", roles)
            .query_opt(
                "includeDerivedMembership",
                self.include_derived_membership.map(|b| b.to_string()),
            )
    }
}
