//! State scoped to a single subdivision pass.

use hashbrown::HashMap;
use xagon_types::{midpoint, EdgeKey, Point3, Triangle, TriangleId, TriangleIdSequence};

use crate::error::{SubdivideError, SubdivideResult};

/// Scratch state shared by every triangle of one subdivision pass.
///
/// Holds the id allocator for the new generation and the midpoint cache
/// used by strategies that share vertices across neighbors. Created at the
/// start of a pass and dropped at the end, so cached midpoints never leak
/// into the next generation.
#[derive(Debug)]
pub struct SubdivisionPass {
    ids: TriangleIdSequence,
    midpoints: HashMap<EdgeKey, Point3<f64>>,
    reused: usize,
    available: u64,
    requested: u64,
}

impl Default for SubdivisionPass {
    fn default() -> Self {
        Self::new(TriangleIdSequence::new())
    }
}

impl SubdivisionPass {
    /// Start a pass whose new triangles take ids from `ids`.
    #[must_use]
    pub fn new(ids: TriangleIdSequence) -> Self {
        Self {
            ids,
            midpoints: HashMap::new(),
            reused: 0,
            available: ids.remaining(),
            requested: 0,
        }
    }

    /// Allocate the id of the next child triangle.
    ///
    /// Past the end of the id space this keeps returning `u32::MAX` and
    /// [`finish`](Self::finish) fails.
    pub fn allocate_id(&mut self) -> TriangleId {
        self.requested += 1;
        self.ids.allocate().unwrap_or(TriangleId::new(u32::MAX))
    }

    /// Midpoint of edge `a`-`b`, computed once per pass.
    ///
    /// The cache is keyed by the unordered pair of endpoints, so both
    /// triangles bordering an edge receive the same point regardless of the
    /// direction they walk it.
    pub fn shared_midpoint(&mut self, a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
        let key = EdgeKey::between(a, b);
        if let Some(&m) = self.midpoints.get(&key) {
            self.reused += 1;
            return m;
        }
        let m = midpoint(a, b);
        self.midpoints.insert(key, m);
        m
    }

    /// Number of distinct midpoints computed through the cache.
    #[must_use]
    pub fn cached_midpoints(&self) -> usize {
        self.midpoints.len()
    }

    /// Number of cache hits.
    #[must_use]
    pub const fn reused_midpoints(&self) -> usize {
        self.reused
    }

    /// End the pass, handing back the id sequence for the next one.
    ///
    /// # Errors
    ///
    /// Returns [`SubdivideError::IdSpaceExhausted`] if the pass asked for
    /// more ids than were left.
    pub fn finish(self) -> SubdivideResult<TriangleIdSequence> {
        if self.requested > self.available {
            return Err(SubdivideError::IdSpaceExhausted {
                needed: self.requested,
                available: self.available,
            });
        }
        Ok(self.ids)
    }

    /// Build the four children of `parent` from its edge midpoints.
    ///
    /// Children follow the parent's winding: three corner triangles in
    /// `p1, p2, p3` order, then the central triangle.
    pub(crate) fn assemble(
        &mut self,
        parent: &Triangle,
        m12: Point3<f64>,
        m23: Point3<f64>,
        m31: Point3<f64>,
    ) -> [Triangle; 4] {
        let [p1, p2, p3] = parent.vertices();
        [
            Triangle::new(self.allocate_id(), p1, m12, m31),
            Triangle::new(self.allocate_id(), p2, m23, m12),
            Triangle::new(self.allocate_id(), p3, m31, m23),
            Triangle::new(self.allocate_id(), m12, m23, m31),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_midpoint_is_cached_per_edge() {
        let mut pass = SubdivisionPass::default();
        let a = Point3::new(0.3, 0.1, 0.7);
        let b = Point3::new(-0.2, 0.9, 0.4);

        let m1 = pass.shared_midpoint(&a, &b);
        let m2 = pass.shared_midpoint(&b, &a);

        assert_eq!(m1, m2);
        assert_eq!(pass.cached_midpoints(), 1);
        assert_eq!(pass.reused_midpoints(), 1);
    }

    #[test]
    fn test_ids_continue_across_finish() {
        let mut pass = SubdivisionPass::new(TriangleIdSequence::starting_at(20));
        assert_eq!(pass.allocate_id().get(), 20);
        let ids = pass.finish().unwrap();
        assert_eq!(ids.peek(), 21);
    }

    #[test]
    fn test_finish_fails_after_running_out_of_ids() {
        let mut pass = SubdivisionPass::new(TriangleIdSequence::starting_at(u32::MAX));
        assert_eq!(pass.allocate_id().get(), u32::MAX);
        assert!(pass.finish().is_ok());

        let mut pass = SubdivisionPass::new(TriangleIdSequence::starting_at(u32::MAX));
        pass.allocate_id();
        assert_eq!(pass.allocate_id().get(), u32::MAX);
        assert!(matches!(
            pass.finish(),
            Err(SubdivideError::IdSpaceExhausted { .. })
        ));
    }
}
