//! Output module
//!
//! Renders record collections for people and for other tools: JSON, a
//! pretty-printed table, or a Parquet file built from the Arrow batch.

mod render;
mod writer;

pub use render::{render_json, render_table, write_records, OutputFormat, OutputSummary};
pub use writer::{write_batch_to_parquet, ParquetWriter, ParquetWriterConfig};
