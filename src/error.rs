//! Error handling for swim result processing.
//!
//! Every variant describes a failure that skips one file. Problems with a
//! single cell (a bad time, an unreadable event header) are not errors; they
//! are reported as [`crate::standardizer::Diagnostic`] values instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Spreadsheet error in file: {path} - {source}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("CSV error in file: {path} - {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Unsupported input format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Workbook has no worksheets: {path}")]
    EmptyWorkbook { path: PathBuf },

    #[error("Sheet too narrow in file: {path} - expected at least {expected} columns, found {found}")]
    SheetTooNarrow {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("Missing required columns in file: {path} - {}", missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl SwimError {
    /// Create a spreadsheet error for the given file
    pub fn spreadsheet(path: impl Into<PathBuf>, source: calamine::Error) -> Self {
        Self::Spreadsheet {
            path: path.into(),
            source,
        }
    }

    /// Create a CSV error for the given file
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SwimError>;
