//! CLI commands and argument parsing

use crate::config::DEFAULT_MODULE;
use crate::members::{DeliverySettings, ListMembersOptions, MemberAttributes, MemberRole};
use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Manage Google Workspace group memberships through the Directory API
#[derive(Parser, Debug)]
#[command(name = "admin-directory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Module whose `<module>_*` environment variables configure access
    #[arg(short, long, global = true, default_value = DEFAULT_MODULE)]
    pub module: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Output file (required for parquet)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every member of a group
    List {
        /// Group email address, alias or unique ID
        group_key: String,

        /// Only members with this role (repeatable)
        #[arg(long = "role")]
        roles: Vec<MemberRole>,

        /// Page size requested from the API (1-200)
        #[arg(long)]
        max_results: Option<u32>,

        /// Start from this page token
        #[arg(long)]
        page_token: Option<String>,

        /// Include members of nested groups
        #[arg(long)]
        include_derived_membership: bool,
    },

    /// Show one member of a group
    Get {
        /// Group email address, alias or unique ID
        group_key: String,
        /// Member email address or unique ID
        member_key: String,
    },

    /// Check whether a user or group is a member, directly or nested
    HasMember {
        /// Group email address, alias or unique ID
        group_key: String,
        /// Member email address or unique ID
        member_key: String,
    },

    /// Add a member to a group
    Insert {
        /// Group email address, alias or unique ID
        group_key: String,

        /// Attributes to set
        #[command(flatten)]
        attributes: AttributeArgs,
    },

    /// Change a member's role or delivery settings
    Update {
        /// Group email address, alias or unique ID
        group_key: String,
        /// Member email address or unique ID
        member_key: String,

        /// Attributes to set
        #[command(flatten)]
        attributes: AttributeArgs,
    },

    /// Remove a member from a group
    Delete {
        /// Group email address, alias or unique ID
        group_key: String,
        /// Member email address or unique ID
        member_key: String,
    },
}

/// Member attributes accepted by `insert` and `update`
#[derive(Args, Debug, Clone, Default)]
pub struct AttributeArgs {
    /// Member email address
    #[arg(long)]
    pub email: Option<String>,

    /// Role in the group (OWNER, MANAGER, MEMBER)
    #[arg(long)]
    pub role: Option<MemberRole>,

    /// Mail delivery (ALL_MAIL, DAILY, DIGEST, DISABLED, NONE)
    #[arg(long)]
    pub delivery_settings: Option<DeliverySettings>,
}

impl From<&AttributeArgs> for MemberAttributes {
    fn from(args: &AttributeArgs) -> Self {
        MemberAttributes {
            email: args.email.clone(),
            role: args.role,
            delivery_settings: args.delivery_settings,
            etag: None,
        }
    }
}

impl Commands {
    /// List options carried by a `list` command
    pub fn list_options(&self) -> Option<ListMembersOptions> {
        let Commands::List {
            roles,
            max_results,
            page_token,
            include_derived_membership,
            ..
        } = self
        else {
            return None;
        };

        let mut options = ListMembersOptions {
            page_token: page_token.clone(),
            max_results: *max_results,
            ..ListMembersOptions::default()
        };
        for role in roles {
            options = options.role(*role);
        }
        if *include_derived_membership {
            options = options.include_derived_membership(true);
        }
        Some(options)
    }
}
