// Core structs and the per-stage error taxonomy.
use serde_json::Value;
use thiserror::Error;

/// One trace as decoded from an embedded chart data block, before any
/// date parsing or numeric coercion has happened.
#[derive(Debug, Clone)]
pub struct RawSeries {
    pub name: String,
    pub x: Vec<Value>,
    pub y: Vec<Value>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error fetching {url}: {reason}")]
    Http { url: String, reason: String },
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("marker `{marker}` not found in page {page}")]
    MarkerNotFound { page: String, marker: String },
    #[error("no matching `]` for the data array in page {page}")]
    UnbalancedBrackets { page: String },
    #[error("json decode failed for page {page}: {source}")]
    Json {
        page: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("expected series `{0}` missing from extracted traces")]
    MissingSeries(String),
    #[error("index series `{0}` produced no usable dates")]
    EmptyIndex(String),
}

#[derive(Debug, Error)]
pub enum IndicatorError {
    #[error("required column `{0}` missing from table")]
    MissingColumn(String),
    #[error("column `{name}` has {got} rows, table has {expected}")]
    LengthMismatch {
        name: String,
        got: usize,
        expected: usize,
    },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("invalid timestamp in cache: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),
}

#[derive(Debug, Error)]
pub enum TabularError {
    #[error("csv error reading {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("table {0} has no numeric columns beside the date")]
    NoColumns(String),
}

/// Umbrella for a single page pipeline; one page failing with any of these
/// must not stop the remaining pages.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Assemble(#[from] AssembleError),
    #[error(transparent)]
    Indicator(#[from] IndicatorError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Tabular(#[from] TabularError),
    #[error("invalid page config: {0}")]
    Config(String),
    #[error("failed to write chart spec: {0}")]
    Write(#[from] std::io::Error),
    #[error("failed to serialize chart spec: {0}")]
    Serialize(#[from] serde_json::Error),
}
