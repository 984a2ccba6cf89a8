//! Group membership client

use super::types::{ListMembersOptions, MemberAttributes};
use crate::auth::CredentialContext;
use crate::config::{ModuleConfig, GROUP_SCOPE};
use crate::error::{Error, Result};
use crate::http::{ApiCall, Gateway, HttpGateway};
use crate::pagination::{collect_pages, TokenPaginator};
use crate::record::{json_kind, Record, RecordCollection};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

const GROUPS: &str = "groups";
const MEMBERS: &str = "members";
const HAS_MEMBER: &str = "hasMember";

/// Client for the `members` resource of a directory
///
/// Every operation is one logical request against the gateway; listing
/// walks all pages before returning. The client holds no state of its own
/// between calls.
pub struct MembersClient<G> {
    gateway: G,
    paginator: TokenPaginator,
}

impl MembersClient<HttpGateway> {
    /// Client configured from a module's environment variables
    pub fn from_env(module: &str) -> Result<Self> {
        Self::from_config(ModuleConfig::from_env(module)?)
    }

    /// Client for a resolved module configuration
    pub fn from_config(config: ModuleConfig) -> Result<Self> {
        let credentials = CredentialContext::from_config(config, &[GROUP_SCOPE])?;
        Self::from_credentials(Arc::new(credentials))
    }

    /// Client sharing an existing credential context
    pub fn from_credentials(credentials: Arc<CredentialContext>) -> Result<Self> {
        Ok(Self::new(HttpGateway::new(credentials)?))
    }
}

impl<G: Gateway> MembersClient<G> {
    /// Client over any gateway
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            paginator: TokenPaginator::google(MEMBERS),
        }
    }

    /// The underlying gateway
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// List every member of a group, following all pages
    pub async fn list_members(
        &self,
        group_key: &str,
        options: &ListMembersOptions,
    ) -> Result<RecordCollection> {
        require("group_key", group_key)?;
        options.validate()?;

        let call = options.apply(ApiCall::get([GROUPS, group_key, MEMBERS]));
        let members = collect_pages(&self.gateway, call, &self.paginator).await?;

        info!("Listed {} members of {}", members.len(), group_key);
        Ok(members)
    }

    /// Fetch one member
    pub async fn get_member(&self, group_key: &str, member_key: &str) -> Result<Record> {
        require("group_key", group_key)?;
        require("member_key", member_key)?;

        let call = ApiCall::get([GROUPS, group_key, MEMBERS, member_key]);
        let body = self.gateway.execute(&call).await?;
        Record::from_value(body, "$")
    }

    /// Check whether a user or group belongs to a group
    ///
    /// Nested memberships count.
    pub async fn has_member(&self, group_key: &str, member_key: &str) -> Result<bool> {
        require("group_key", group_key)?;
        require("member_key", member_key)?;

        let call = ApiCall::get([GROUPS, group_key, HAS_MEMBER, member_key]);
        let body = self.gateway.execute(&call).await?;

        match body.get("isMember") {
            Some(Value::Bool(is_member)) => Ok(*is_member),
            Some(other) => Err(Error::malformed(
                "isMember",
                format!("expected a boolean, found {}", json_kind(other)),
            )),
            None => Err(Error::malformed("isMember", "field missing from response")),
        }
    }

    /// Add a member to a group
    ///
    /// `attributes.email` is required.
    pub async fn insert_member(
        &self,
        group_key: &str,
        attributes: &MemberAttributes,
    ) -> Result<Record> {
        require("group_key", group_key)?;
        match attributes.email.as_deref() {
            Some(email) => require("email", email)?,
            None => return Err(Error::invalid_argument("email", "is required to add a member")),
        }

        let call =
            ApiCall::post([GROUPS, group_key, MEMBERS]).json(serde_json::to_value(attributes)?);
        let body = self.gateway.execute(&call).await?;
        debug!("Inserted member into {}", group_key);
        Record::from_value(body, "$")
    }

    /// Change a member's attributes
    ///
    /// Only the attributes that are set are sent, everything else is left
    /// as it is on the server.
    pub async fn update_member(
        &self,
        group_key: &str,
        member_key: &str,
        attributes: &MemberAttributes,
    ) -> Result<Record> {
        require("group_key", group_key)?;
        require("member_key", member_key)?;

        let call = ApiCall::patch([GROUPS, group_key, MEMBERS, member_key])
            .json(serde_json::to_value(attributes)?);
        let body = self.gateway.execute(&call).await?;
        debug!("Updated member {} of {}", member_key, group_key);
        Record::from_value(body, "$")
    }

    /// Remove a member from a group
    ///
    /// Returns a confirmation message. Removing a member that is not in the
    /// group fails with the gateway's not-found error.
    pub async fn delete_member(&self, group_key: &str, member_key: &str) -> Result<String> {
        require("group_key", group_key)?;
        require("member_key", member_key)?;

        let call = ApiCall::delete([GROUPS, group_key, MEMBERS, member_key]);
        self.gateway.execute(&call).await?;

        let message = format!("{member_key} successfully removed from {group_key}");
        info!("{}", message);
        Ok(message)
    }
}

fn require(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_argument(name, "must not be empty"));
    }
    Ok(())
}
