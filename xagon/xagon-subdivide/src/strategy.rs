//! Subdivision strategies.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use xagon_types::Triangle;

use crate::error::SubdivideError;
use crate::pass::SubdivisionPass;

/// One rule for splitting a triangle into four.
///
/// Implementations must:
/// - return four triangles that exactly tile the input,
/// - produce identical edge points for triangles that shared an edge,
///   within the precision the strategy guarantees,
/// - preserve the parent's winding in every child.
///
/// A board receives its strategy by injection and only learns which
/// implementation it holds through [`kind`](Self::kind).
pub trait SubdivisionStrategy: fmt::Debug {
    /// Short name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// The built-in strategy this is, or `None` for custom strategies.
    fn kind(&self) -> Option<StrategyKind> {
        None
    }

    /// Split `triangle` into a corner triangle per vertex plus the central
    /// triangle spanned by the three edge midpoints.
    fn subdivide(&self, triangle: &Triangle, pass: &mut SubdivisionPass) -> [Triangle; 4];
}

/// Midpoints computed independently for every triangle.
///
/// Each midpoint is found by walking half of the edge from the edge's first
/// endpoint in the triangle's own winding. Two neighbors walk a shared edge
/// in opposite directions, so their midpoints agree only up to rounding and
/// adjacency must match vertices with a tolerance.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveSubdivision;

impl NaiveSubdivision {
    /// Create the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SubdivisionStrategy for NaiveSubdivision {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn kind(&self) -> Option<StrategyKind> {
        Some(StrategyKind::Naive)
    }

    fn subdivide(&self, triangle: &Triangle, pass: &mut SubdivisionPass) -> [Triangle; 4] {
        let [p1, p2, p3] = triangle.vertices();
        let m12 = p1 + (p2 - p1) * 0.5;
        let m23 = p2 + (p3 - p2) * 0.5;
        let m31 = p3 + (p1 - p3) * 0.5;
        pass.assemble(triangle, m12, m23, m31)
    }
}

/// Midpoints shared through the pass cache.
///
/// The first triangle to split an edge computes its midpoint; every later
/// request for the same edge gets the cached, bit-identical point. Adjacency
/// can then match vertices exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneToFourSubdivision;

impl OneToFourSubdivision {
    /// Create the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SubdivisionStrategy for OneToFourSubdivision {
    fn name(&self) -> &'static str {
        "1to4"
    }

    fn kind(&self) -> Option<StrategyKind> {
        Some(StrategyKind::OneToFour)
    }

    fn subdivide(&self, triangle: &Triangle, pass: &mut SubdivisionPass) -> [Triangle; 4] {
        let [p1, p2, p3] = triangle.vertices();
        let m12 = pass.shared_midpoint(&p1, &p2);
        let m23 = pass.shared_midpoint(&p2, &p3);
        let m31 = pass.shared_midpoint(&p3, &p1);
        pass.assemble(triangle, m12, m23, m31)
    }
}

/// The built-in strategies, selectable by name.
///
/// # Example
///
/// ```
/// use xagon_subdivide::StrategyKind;
///
/// let kind: StrategyKind = "1to4".parse()?;
/// assert_eq!(kind, StrategyKind::OneToFour);
/// assert_eq!(kind.build().name(), "1to4");
///
/// assert!("loop".parse::<StrategyKind>().is_err());
/// # Ok::<(), xagon_subdivide::SubdivideError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StrategyKind {
    /// [`NaiveSubdivision`].
    Naive,
    /// [`OneToFourSubdivision`].
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "1to4"))]
    OneToFour,
}

impl StrategyKind {
    /// Instantiate the strategy.
    #[must_use]
    pub fn build(self) -> Box<dyn SubdivisionStrategy> {
        match self {
            Self::Naive => Box::new(NaiveSubdivision),
            Self::OneToFour => Box::new(OneToFourSubdivision),
        }
    }

    /// Whether the strategy guarantees bit-identical shared midpoints.
    #[must_use]
    pub const fn shares_midpoints(self) -> bool {
        matches!(self, Self::OneToFour)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Naive => f.write_str("naive"),
            Self::OneToFour => f.write_str("1to4"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = SubdivideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naive" => Ok(Self::Naive),
            "1to4" | "1-to-4" | "one-to-four" => Ok(Self::OneToFour),
            _ => Err(SubdivideError::UnknownStrategy {
                name: s.to_string(),
            }),
        }
    }
}
