//! Error types for cloudview

use thiserror::Error;

/// Main error type for cloudview operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Visualization error: {0}")]
    Visualization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for cloudview operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error was raised while reading or validating input data,
    /// as opposed to a failure of the graphics device or the host window.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Error::Io(_) | Error::InvalidData(_) | Error::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_names_line() {
        let err = Error::Parse { line: 4, message: "expected 3 columns, found 2".to_string() };
        assert_eq!(err.to_string(), "Parse error on line 4: expected 3 columns, found 2");
    }

    #[test]
    fn test_load_error_classification() {
        assert!(Error::InvalidData("empty".into()).is_load_error());
        assert!(Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")).is_load_error());
        assert!(!Error::Gpu("lost device".into()).is_load_error());
    }
}
