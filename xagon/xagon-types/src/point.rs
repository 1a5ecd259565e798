//! Point helpers and canonical vertex/edge keys.

use nalgebra::Point3;

/// Midpoint of the segment `a`-`b`.
///
/// Symmetric in its arguments: `midpoint(a, b)` and `midpoint(b, a)` are
/// bit-identical.
///
/// # Example
///
/// ```
/// use xagon_types::{midpoint, Point3};
///
/// let m = midpoint(&Point3::new(0.0, 0.0, 0.0), &Point3::new(2.0, 4.0, -2.0));
/// assert_eq!(m, Point3::new(1.0, 2.0, -1.0));
/// ```
#[inline]
#[must_use]
pub fn midpoint(a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
    Point3::new(
        (a.x + b.x) * 0.5,
        (a.y + b.y) * 0.5,
        (a.z + b.z) * 0.5,
    )
}

/// Exact, hashable identity of a vertex position.
///
/// Two points map to the same key iff their coordinates are bit-identical,
/// with `-0.0` treated as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey([u64; 3]);

impl VertexKey {
    /// Key for a point.
    #[inline]
    #[must_use]
    pub fn new(p: &Point3<f64>) -> Self {
        Self([canonical_bits(p.x), canonical_bits(p.y), canonical_bits(p.z)])
    }

    /// Recover the point this key was built from.
    #[inline]
    #[must_use]
    pub fn to_point(self) -> Point3<f64> {
        let [x, y, z] = self.0;
        Point3::new(f64::from_bits(x), f64::from_bits(y), f64::from_bits(z))
    }
}

impl From<&Point3<f64>> for VertexKey {
    fn from(p: &Point3<f64>) -> Self {
        Self::new(p)
    }
}

// Adding +0.0 folds -0.0 onto +0.0 and leaves every other value untouched.
fn canonical_bits(v: f64) -> u64 {
    (v + 0.0).to_bits()
}

/// Unordered edge identity: the sorted pair of its endpoint keys.
///
/// # Example
///
/// ```
/// use xagon_types::{EdgeKey, Point3};
///
/// let a = Point3::new(0.0, 0.0, 0.0);
/// let b = Point3::new(1.0, 0.0, 0.0);
/// assert_eq!(EdgeKey::between(&a, &b), EdgeKey::between(&b, &a));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey(VertexKey, VertexKey);

impl EdgeKey {
    /// Canonical key for the edge joining two vertex keys.
    #[inline]
    #[must_use]
    pub fn new(a: VertexKey, b: VertexKey) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    /// Canonical key for the edge joining two points.
    #[inline]
    #[must_use]
    pub fn between(a: &Point3<f64>, b: &Point3<f64>) -> Self {
        Self::new(VertexKey::new(a), VertexKey::new(b))
    }

    /// Endpoint keys, smaller first.
    #[inline]
    #[must_use]
    pub const fn endpoints(&self) -> (VertexKey, VertexKey) {
        (self.0, self.1)
    }
}
