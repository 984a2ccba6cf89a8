//! Pagination module
//!
//! Walks page-token paginated list endpoints to completion.
//!
//! # Overview
//!
//! A [`Paginator`] knows where a page keeps its records and its
//! continuation token, and how to put that token on the next request.
//! [`collect_pages`] drives the loop: request, read records, follow the
//! token, stop on the first page whose response has no token. Pages are
//! requested strictly one after another and any failure aborts the walk
//! without returning the records gathered so far.

mod token;
mod types;
mod walker;

pub use token::TokenPaginator;
pub use types::{NextPage, PageOutcome, PaginationState, Paginator};
pub use walker::collect_pages;
