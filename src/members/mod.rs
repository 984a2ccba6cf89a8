//! Group membership
//!
//! Typed attributes for the directory's `members` resource and a client
//! that lists, reads, adds, changes and removes group members.
//!
//! ```no_run
//! use admin_directory::members::{ListMembersOptions, MemberRole, MembersClient};
//!
//! # async fn run() -> admin_directory::Result<()> {
//! let client = MembersClient::from_env("admin_directory")?;
//! let owners = client
//!     .list_members("team@example.com", &ListMembersOptions::new().role(MemberRole::Owner))
//!     .await?;
//! println!("{} owners", owners.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod types;

pub use client::MembersClient;
pub use types::{
    DeliverySettings, ListMembersOptions, MemberAttributes, MemberRole, MAX_PAGE_SIZE,
};

#[cfg(test)]
mod tests;
