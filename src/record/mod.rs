//! Records and their tabular form
//!
//! A [`Record`] is one item of a directory resource as a field-name to
//! value map; records of one query may carry different field sets. A
//! [`RecordCollection`] is the ordered result of a list query.
//!
//! [`to_record_batch`] turns any slice of records into an Arrow
//! `RecordBatch`: one row per record, one column per field name seen
//! (first-appearance order), nulls where a record lacks a field. It is a
//! pure function with no knowledge of pagination or the network.

mod table;
mod types;

pub use table::{infer_schema, to_record_batch};
pub use types::{Record, RecordCollection};
pub(crate) use types::json_kind;

#[cfg(test)]
mod tests;
