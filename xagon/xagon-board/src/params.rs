//! Board parameters.

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};

/// Distance below which two vertices count as the same point under
/// [`EdgeMatching::Tolerance`].
pub const DEFAULT_EDGE_EPSILON: f64 = 1e-9;

/// Largest board the defaults allow: 20 * 4^8 triangles.
pub const DEFAULT_MAX_TRIANGLES: usize = 1_310_720;

/// How the adjacency index decides that two triangles share a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum EdgeMatching {
    /// Vertices match only when their coordinates are bit-identical.
    /// Sound with the 1-to-4 strategy, which shares midpoints by construction.
    Exact,

    /// Vertices closer than `epsilon` are welded together.
    /// Required for the naive strategy; harmless for 1-to-4.
    Tolerance {
        /// Welding distance.
        epsilon: f64,
    },
}

impl Default for EdgeMatching {
    fn default() -> Self {
        Self::Tolerance {
            epsilon: DEFAULT_EDGE_EPSILON,
        }
    }
}

/// Parameters for an [`Icosahedron`](crate::Icosahedron).
///
/// # Example
///
/// ```
/// use xagon_board::{BoardParams, EdgeMatching};
///
/// let params = BoardParams::new()
///     .with_edge_matching(EdgeMatching::Exact)
///     .with_max_triangles(5_120);
///
/// assert_eq!(params.max_triangles, 5_120);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardParams {
    /// Vertex matching policy for the adjacency index.
    ///
    /// Default: tolerance of [`DEFAULT_EDGE_EPSILON`].
    pub edge_matching: EdgeMatching,

    /// Upper bound on the triangle count subdivision may produce.
    ///
    /// Default: [`DEFAULT_MAX_TRIANGLES`]
    pub max_triangles: usize,
}

impl Default for BoardParams {
    fn default() -> Self {
        Self {
            edge_matching: EdgeMatching::default(),
            max_triangles: DEFAULT_MAX_TRIANGLES,
        }
    }
}

impl BoardParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters with exact vertex matching.
    #[must_use]
    pub fn exact() -> Self {
        Self {
            edge_matching: EdgeMatching::Exact,
            ..Self::default()
        }
    }

    /// Set the vertex matching policy.
    #[must_use]
    pub const fn with_edge_matching(mut self, edge_matching: EdgeMatching) -> Self {
        self.edge_matching = edge_matching;
        self
    }

    /// Match vertices within `epsilon`.
    #[must_use]
    pub const fn with_tolerance(mut self, epsilon: f64) -> Self {
        self.edge_matching = EdgeMatching::Tolerance { epsilon };
        self
    }

    /// Set the maximum triangle count.
    #[must_use]
    pub const fn with_max_triangles(mut self, max_triangles: usize) -> Self {
        self.max_triangles = max_triangles;
        self
    }

    /// Check that the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidArgument`] if the tolerance is not a
    /// positive finite number or `max_triangles` is below the 20 base faces.
    pub fn validate(&self) -> BoardResult<()> {
        if let EdgeMatching::Tolerance { epsilon } = self.edge_matching {
            if !(epsilon.is_finite() && epsilon > 0.0) {
                return Err(BoardError::invalid_argument(format!(
                    "edge matching epsilon must be positive and finite, got {epsilon}"
                )));
            }
        }
        if self.max_triangles < 20 {
            return Err(BoardError::invalid_argument(format!(
                "max_triangles must be at least 20, got {}",
                self.max_triangles
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = BoardParams::default();
        assert_eq!(
            params.edge_matching,
            EdgeMatching::Tolerance {
                epsilon: DEFAULT_EDGE_EPSILON
            }
        );
        assert_eq!(params.max_triangles, 20 * 4_usize.pow(8));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_epsilon() {
        for eps in [0.0, -1e-9, f64::NAN, f64::INFINITY] {
            let err = BoardParams::new().with_tolerance(eps).validate().unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn test_rejects_tiny_max() {
        assert!(BoardParams::new().with_max_triangles(19).validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let params: BoardParams =
            serde_json::from_str(r#"{"edge_matching":{"policy":"exact"}}"#).unwrap();
        assert_eq!(params, BoardParams::exact());

        let params: BoardParams = serde_json::from_str(
            r#"{"edge_matching":{"policy":"tolerance","epsilon":1e-6},"max_triangles":1280}"#,
        )
        .unwrap();
        assert_eq!(params.edge_matching, EdgeMatching::Tolerance { epsilon: 1e-6 });
        assert_eq!(params.max_triangles, 1280);
    }
}
