//! Whole-generation subdivision.

use tracing::debug;
use xagon_types::{Triangle, TriangleIdSequence};

use crate::error::{SubdivideError, SubdivideResult};
use crate::pass::SubdivisionPass;
use crate::result::SubdivisionResult;
use crate::strategy::SubdivisionStrategy;

/// Number of subdivision passes to apply.
///
/// Wraps a `u32`; [`TryFrom<i64>`] rejects negative or oversized input for
/// callers that hold untyped integers.
///
/// # Example
///
/// ```
/// use xagon_subdivide::SubdivisionLevel;
///
/// assert_eq!(SubdivisionLevel::try_from(2_i64)?.get(), 2);
/// assert!(SubdivisionLevel::try_from(-1_i64).is_err());
/// # Ok::<(), xagon_subdivide::SubdivideError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubdivisionLevel(u32);

impl SubdivisionLevel {
    /// Wrap a level.
    #[must_use]
    pub const fn new(levels: u32) -> Self {
        Self(levels)
    }

    /// The number of passes.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for SubdivisionLevel {
    fn from(levels: u32) -> Self {
        Self(levels)
    }
}

impl TryFrom<i64> for SubdivisionLevel {
    type Error = SubdivideError;

    fn try_from(levels: i64) -> Result<Self, Self::Error> {
        if levels < 0 {
            return Err(SubdivideError::NegativeLevel(levels));
        }
        u32::try_from(levels)
            .map(Self)
            .map_err(|_| SubdivideError::LevelOutOfRange(levels))
    }
}

/// Triangle count after `levels` passes, or `None` on overflow.
///
/// Each pass multiplies the count by 4.
///
/// # Example
///
/// ```
/// use xagon_subdivide::expected_triangles;
///
/// assert_eq!(expected_triangles(20, 0), Some(20));
/// assert_eq!(expected_triangles(20, 2), Some(320));
/// assert_eq!(expected_triangles(20, 64), None);
/// ```
#[must_use]
pub fn expected_triangles(current: usize, levels: u32) -> Option<usize> {
    4_usize
        .checked_pow(levels)
        .and_then(|factor| factor.checked_mul(current))
}

/// Ids consumed by `levels` passes starting from `current` triangles,
/// saturating at `u64::MAX`.
fn ids_needed(current: usize, levels: u32) -> u64 {
    let mut generation = current as u64;
    let mut total = 0_u64;
    for _ in 0..levels {
        generation = generation.saturating_mul(4);
        total = total.saturating_add(generation);
    }
    total
}

fn check_ids(current: usize, levels: u32, ids: TriangleIdSequence) -> SubdivideResult<()> {
    let needed = ids_needed(current, levels);
    if needed > ids.remaining() {
        return Err(SubdivideError::IdSpaceExhausted {
            needed,
            available: ids.remaining(),
        });
    }
    Ok(())
}

/// Apply one pass of `strategy` to every triangle, in order.
///
/// Children of triangle `i` occupy positions `4i..4i + 4` of the output.
/// Ids continue from `ids`; the advanced sequence is returned alongside.
///
/// # Errors
///
/// Returns [`SubdivideError::IdSpaceExhausted`] if `ids` cannot supply four
/// ids per triangle.
pub fn subdivide_once(
    triangles: &[Triangle],
    strategy: &dyn SubdivisionStrategy,
    ids: TriangleIdSequence,
) -> SubdivideResult<(Vec<Triangle>, TriangleIdSequence)> {
    check_ids(triangles.len(), 1, ids)?;
    let mut pass = SubdivisionPass::new(ids);
    let mut next = Vec::with_capacity(triangles.len() * 4);
    for triangle in triangles {
        next.extend(strategy.subdivide(triangle, &mut pass));
    }
    debug!(
        strategy = strategy.name(),
        triangles = next.len(),
        shared_midpoints = pass.cached_midpoints(),
        reused_midpoints = pass.reused_midpoints(),
        "subdivision pass complete"
    );
    Ok((next, pass.finish()?))
}

/// Apply `levels` passes of `strategy`, each to the previous generation.
///
/// Level 0 returns the input unchanged.
///
/// # Errors
///
/// - [`SubdivideError::TooManyTriangles`] if the result would exceed
///   `max_triangles`.
/// - [`SubdivideError::IdSpaceExhausted`] if `ids` runs out before the last
///   pass.
///
/// Both checks happen before any work is done.
///
/// # Example
///
/// ```
/// use xagon_subdivide::{subdivide_triangles, OneToFourSubdivision};
/// use xagon_types::{Triangle, TriangleId, TriangleIdSequence};
///
/// let tri = Triangle::from_arrays(
///     TriangleId::new(0),
///     [0.0, 0.0, 0.0],
///     [1.0, 0.0, 0.0],
///     [0.5, 1.0, 0.0],
/// );
///
/// let result = subdivide_triangles(
///     &[tri],
///     &OneToFourSubdivision,
///     TriangleIdSequence::starting_at(1),
///     2,
///     1_000,
/// )?;
///
/// // 1 * 4^2 = 16 triangles after 2 passes
/// assert_eq!(result.final_triangles, 16);
/// # Ok::<(), xagon_subdivide::SubdivideError>(())
/// ```
pub fn subdivide_triangles(
    triangles: &[Triangle],
    strategy: &dyn SubdivisionStrategy,
    ids: TriangleIdSequence,
    levels: u32,
    max_triangles: usize,
) -> SubdivideResult<SubdivisionResult> {
    let original_triangles = triangles.len();
    let projected = expected_triangles(original_triangles, levels).unwrap_or(usize::MAX);
    if projected > max_triangles {
        return Err(SubdivideError::TooManyTriangles {
            current: original_triangles,
            projected,
            max: max_triangles,
        });
    }
    check_ids(original_triangles, levels, ids)?;

    debug!(
        "Subdividing {} triangles, {} levels using {}",
        original_triangles,
        levels,
        strategy.name()
    );

    let mut current = triangles.to_vec();
    let mut ids = ids;
    for _ in 0..levels {
        let (next, next_ids) = subdivide_once(&current, strategy, ids)?;
        current = next;
        ids = next_ids;
    }

    Ok(SubdivisionResult {
        final_triangles: current.len(),
        triangles: current,
        next_ids: ids,
        original_triangles,
        levels,
        strategy: strategy.name(),
    })
}
