//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur while reading a point table
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("line {line}: expected at least 3 columns, found {found}")]
    TooFewColumns { line: usize, found: usize },

    #[error("line {line}, column {column}: '{value}' is not a finite number")]
    MalformedField { line: usize, column: usize, value: String },

    #[error("could not detect a delimiter on line {line}")]
    UnknownDelimiter { line: usize },

    #[error("table contains no data rows")]
    EmptyTable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IoError> for cloudview_core::Error {
    fn from(err: IoError) -> Self {
        match err {
            IoError::FileNotFound { path } => cloudview_core::Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file not found: {path}"),
            )),
            IoError::TooFewColumns { line, .. }
            | IoError::MalformedField { line, .. }
            | IoError::UnknownDelimiter { line } => cloudview_core::Error::Parse {
                line,
                message: err.to_string(),
            },
            IoError::EmptyTable => cloudview_core::Error::InvalidData(err.to_string()),
            IoError::Io(e) => cloudview_core::Error::Io(e),
        }
    }
}
