//! CLI module
//!
//! Command-line interface for group membership management.
//!
//! # Commands
//!
//! - `list` - Every member of a group, all pages
//! - `get` - One member
//! - `has-member` - Membership check (nested groups count)
//! - `insert` - Add a member
//! - `update` - Change a member's role or delivery settings
//! - `delete` - Remove a member

mod commands;
mod runner;

pub use commands::{AttributeArgs, Cli, Commands};
pub use runner::Runner;
