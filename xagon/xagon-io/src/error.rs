//! Error types for snapshot I/O.

use std::path::PathBuf;
use thiserror::Error;
use xagon_board::BoardError;

/// Result type for snapshot I/O.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading or writing snapshots.
#[derive(Debug, Error)]
pub enum IoError {
    /// Snapshot file not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Snapshot text is malformed, truncated, empty, or holds duplicate ids.
    #[error("invalid snapshot: {message}")]
    Parse {
        /// Description of what was invalid.
        message: String,
    },

    /// The snapshot parsed but does not form a valid board.
    #[error(transparent)]
    Board(#[from] BoardError),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create a `Parse` error with the given message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Whether this is a `Parse` error.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

impl From<serde_json::Error> for IoError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_errors_become_parse_errors() {
        let err: IoError = serde_json::from_str::<u32>("{").unwrap_err().into();
        assert!(err.is_parse());
        assert!(err.to_string().starts_with("invalid snapshot:"));
    }

    #[test]
    fn test_board_errors_are_transparent() {
        let err: IoError = BoardError::inconsistency("edge shared by 3 triangles").into();
        assert_eq!(
            err.to_string(),
            "geometry inconsistency: edge shared by 3 triangles"
        );
    }
}
