//! Error types for subdivision operations.

use thiserror::Error;

/// Errors that can occur during subdivision.
#[derive(Debug, Error)]
pub enum SubdivideError {
    /// Strategy name not recognized.
    #[error("unknown subdivision strategy {name:?} (expected \"naive\" or \"1to4\")")]
    UnknownStrategy {
        /// The name that failed to parse.
        name: String,
    },

    /// Negative subdivision level.
    #[error("invalid subdivision level: {0} (must be >= 0)")]
    NegativeLevel(i64),

    /// Subdivision level too large to represent.
    #[error("invalid subdivision level: {0} (must be <= {max})", max = u32::MAX)]
    LevelOutOfRange(i64),

    /// Not enough triangle ids left for the new triangles.
    #[error("triangle id space exhausted: {needed} ids needed, {available} left")]
    IdSpaceExhausted {
        /// Ids the subdivision would allocate (saturating).
        needed: u64,
        /// Ids left in the sequence.
        available: u64,
    },

    /// Subdivision would exceed the allowed triangle count.
    #[error("subdivision would exceed maximum triangle count ({current} -> {projected}, max {max})")]
    TooManyTriangles {
        /// Current triangle count.
        current: usize,
        /// Projected triangle count after subdivision (saturating).
        projected: usize,
        /// Maximum allowed triangle count.
        max: usize,
    },
}

/// Result type for subdivision operations.
pub type SubdivideResult<T> = std::result::Result<T, SubdivideError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SubdivideError::UnknownStrategy {
            name: "loop".to_string(),
        };
        assert!(format!("{err}").contains("\"loop\""));

        let err = SubdivideError::NegativeLevel(-2);
        assert!(format!("{err}").contains("-2"));

        let err = SubdivideError::LevelOutOfRange(1 << 40);
        let display = format!("{err}");
        assert!(display.contains("1099511627776"));
        assert!(display.contains("4294967295"));

        let err = SubdivideError::TooManyTriangles {
            current: 320,
            projected: 5120,
            max: 1280,
        };
        let display = format!("{err}");
        assert!(display.contains("320"));
        assert!(display.contains("5120"));
        assert!(display.contains("1280"));
    }
}
