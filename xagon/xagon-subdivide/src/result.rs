//! Result types for subdivision operations.

// Triangle counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]

use xagon_types::{Triangle, TriangleIdSequence};

/// Result of subdividing a generation of triangles.
#[derive(Debug, Clone)]
pub struct SubdivisionResult {
    /// The new generation, children grouped by parent.
    pub triangles: Vec<Triangle>,

    /// Id sequence positioned after the last allocated id.
    pub next_ids: TriangleIdSequence,

    /// Number of triangles before subdivision.
    pub original_triangles: usize,

    /// Number of triangles after subdivision.
    pub final_triangles: usize,

    /// Number of passes performed.
    pub levels: u32,

    /// Name of the strategy used.
    pub strategy: &'static str,
}

impl SubdivisionResult {
    /// Get the triangle multiplication factor.
    #[must_use]
    pub fn triangle_ratio(&self) -> f64 {
        if self.original_triangles == 0 {
            1.0
        } else {
            self.final_triangles as f64 / self.original_triangles as f64
        }
    }

    /// Check if any subdivision occurred.
    #[must_use]
    pub const fn was_subdivided(&self) -> bool {
        self.levels > 0 && self.final_triangles > self.original_triangles
    }
}

impl std::fmt::Display for SubdivisionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Subdivision ({}): {} → {} triangles ({:.1}x), {} levels",
            self.strategy,
            self.original_triangles,
            self.final_triangles,
            self.triangle_ratio(),
            self.levels
        )
    }
}
