// src/error.rs
//! Error kinds of the fetch → extract → normalize pipeline and the export path.
//!
//! `NetworkError` and `SchemaError` abort a pipeline run. `RowParseError` never
//! leaves the normalizer: the row is dropped and the error lands in the
//! dataset's `DropReport`.

use std::time::Duration;

use thiserror::Error;

use crate::model::Column;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("could not connect to {url}: {msg}")]
    Connect { url: String, msg: String },
    #[error("request to {url} timed out after {}", fmt_duration(.after))]
    Timeout { url: String, after: Duration },
    #[error("HTTP error: {code} {url}")]
    Status { code: u16, url: String },
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("request failed: {0}")]
    Request(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("no data table found on the page ({tables} tables inspected)")]
    NoTable { tables: usize },
    #[error("company table is missing columns: {}", fmt_columns(.missing))]
    MissingColumns { missing: Vec<Column> },
    #[error("company table matched but none of its {rows} rows could be parsed")]
    NoRows { rows: usize },
}

/// "15s", "1.5s" or "500ms".
fn fmt_duration(d: &Duration) -> String {
    match d.as_millis() {
        ms if ms < 1000 => format!("{ms}ms"),
        ms if ms % 1000 == 0 => format!("{}s", ms / 1000),
        _ => format!("{:.1}s", d.as_secs_f64()),
    }
}

fn fmt_columns(cols: &[Column]) -> String {
    cols.iter().map(|c| c.header()).collect::<Vec<_>>().join(", ")
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowParseError {
    #[error("missing {}", .0.header())]
    Missing(Column),
    #[error("unparseable {}: {raw:?}", .column.header())]
    Invalid { column: Column, raw: String },
    #[error("duplicate rank {0}")]
    DuplicateRank(u32),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {line}: {msg}")]
    Csv { line: usize, msg: String },
    #[error("path exists but is not a directory: {0}")]
    NotADirectory(String),
}
