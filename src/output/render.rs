//! Text renderings and the format switch

use super::writer::write_batch_to_parquet;
use crate::error::{Error, Result};
use crate::record::RecordCollection;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// How results are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    #[default]
    Json,
    /// Table for terminals
    Pretty,
    /// Parquet file (needs a path)
    Parquet,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Pretty => "pretty",
            OutputFormat::Parquet => "parquet",
        };
        f.write_str(name)
    }
}

/// What was written, and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSummary {
    /// Rows emitted
    pub rows: usize,
    /// File written, if any
    pub path: Option<PathBuf>,
}

/// Records as a pretty-printed JSON array
pub fn render_json(records: &RecordCollection) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// A batch as an ASCII table
pub fn render_table(batch: &RecordBatch) -> Result<String> {
    if batch.num_columns() == 0 {
        return Ok(format!("({} rows, no fields)", batch.num_rows()));
    }
    Ok(pretty_format_batches(std::slice::from_ref(batch))?.to_string())
}

/// Emit records in `format`
///
/// Text formats go to `out`; Parquet goes to `path`, which is then required.
pub fn write_records<W: Write>(
    records: &RecordCollection,
    format: OutputFormat,
    path: Option<&Path>,
    out: &mut W,
) -> Result<OutputSummary> {
    let rows = records.len();

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", render_json(records)?)?;
            Ok(OutputSummary { rows, path: None })
        }
        OutputFormat::Pretty => {
            let batch = records.to_record_batch()?;
            writeln!(out, "{}", render_table(&batch)?)?;
            Ok(OutputSummary { rows, path: None })
        }
        OutputFormat::Parquet => {
            let path = path
                .ok_or_else(|| Error::output("Parquet output needs an output path"))?;
            let batch = records.to_record_batch()?;
            let rows = write_batch_to_parquet(path, &batch, None)?;
            Ok(OutputSummary {
                rows,
                path: Some(path.to_path_buf()),
            })
        }
    }
}
