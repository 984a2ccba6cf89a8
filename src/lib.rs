//! # admin-directory
//!
//! Service-account client for directory group memberships.
//!
//! ## Features
//!
//! - **Service-account auth**: RS256 JWT assertion exchanged for a cached bearer token
//! - **Complete listings**: every page of a group's members, in arrival order
//! - **Single-record operations**: get, membership check, add, patch, remove
//! - **Tabular output**: Arrow RecordBatch, pretty tables and Parquet files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use admin_directory::members::{ListMembersOptions, MembersClient};
//!
//! #[tokio::main]
//! async fn main() -> admin_directory::Result<()> {
//!     // Reads admin_directory_service_account_file_path and admin_directory_google_user
//!     let client = MembersClient::from_env("admin_directory")?;
//!
//!     let members = client
//!         .list_members("team@example.com", &ListMembersOptions::new())
//!         .await?;
//!     let batch = members.to_record_batch()?;
//!     println!("{} members, {} columns", batch.num_rows(), batch.num_columns());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                         MembersClient                          │
//! │  list_members → RecordCollection   get/insert/update → Record  │
//! │  has_member → bool                 delete_member → String      │
//! └────────────────────────────────────────────────────────────────┘
//!                                 │
//! ┌──────────────┬────────────────┴──┬──────────────┬──────────────┐
//! │    Config    │     Gateway       │  Paginate    │   Output     │
//! ├──────────────┼───────────────────┼──────────────┼──────────────┤
//! │ <module>_*   │ reqwest + bearer  │ pageToken /  │ Arrow        │
//! │ env vars     │ governor throttle │ nextPage-    │ Parquet      │
//! │ key file     │ status → Error    │ Token        │ JSON/table   │
//! └──────────────┴───────────────────┴──────────────┴──────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Environment configuration
pub mod config;

/// Service-account authentication
pub mod auth;

/// API gateway over HTTP with throttling
pub mod http;

/// Page-token pagination
pub mod pagination;

/// Records and their Arrow rendition
pub mod record;

/// JSON, table and Parquet output
pub mod output;

/// Group membership client
pub mod members;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::ModuleConfig;
pub use members::{ListMembersOptions, MemberAttributes, MemberRole, MembersClient};
pub use record::{Record, RecordCollection};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
