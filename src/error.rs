use std::path::PathBuf;

use thiserror::Error;

/// File-level failures; `Series::from_csv` turns these into an empty series.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file {} does not exist", .path.display())]
    Missing { path: PathBuf },

    #[error("could not open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Reasons a single data row is skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("row has no column {0}")]
    MissingColumn(usize),

    #[error("column {column}: invalid number {value:?}")]
    Number { column: usize, value: String },

    #[error("column {column}: datetime {value:?} does not match {format}")]
    Datetime {
        column: usize,
        value: String,
        format: &'static str,
    },

    #[error("unreadable record: {0}")]
    Record(String),
}
