//! Error types for board operations.

use thiserror::Error;
use xagon_subdivide::SubdivideError;

/// Result type alias for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors that can occur during board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Caller supplied a value the operation cannot accept
    /// (subdivision level, strategy name, unknown triangle id, bad parameter).
    #[error("invalid argument: {details}")]
    InvalidArgument {
        /// What was wrong with the argument.
        details: String,
    },

    /// An internal geometric invariant is broken (degenerate triangle,
    /// edge shared by more than two triangles, vertex fan that cannot form
    /// a polygon). The operation was aborted without partial results.
    #[error("geometry inconsistency: {details}")]
    GeometryInconsistency {
        /// Which invariant failed and where.
        details: String,
    },
}

impl BoardError {
    /// Create an `InvalidArgument` error with the given details.
    #[must_use]
    pub fn invalid_argument(details: impl Into<String>) -> Self {
        Self::InvalidArgument {
            details: details.into(),
        }
    }

    /// Create a `GeometryInconsistency` error with the given details.
    #[must_use]
    pub fn inconsistency(details: impl Into<String>) -> Self {
        Self::GeometryInconsistency {
            details: details.into(),
        }
    }

    /// Whether this is an `InvalidArgument` error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Whether this is a `GeometryInconsistency` error.
    #[must_use]
    pub const fn is_geometry_inconsistency(&self) -> bool {
        matches!(self, Self::GeometryInconsistency { .. })
    }
}

// Every subdivision failure stems from caller input.
impl From<SubdivideError> for BoardError {
    fn from(err: SubdivideError) -> Self {
        Self::invalid_argument(err.to_string())
    }
}
