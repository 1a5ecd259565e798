//! Triangle faces of the board.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{EdgeKey, TriangleId, VertexKey};

/// A board face: a stable id plus three ordered vertices.
///
/// Winding is **counter-clockwise (CCW) when viewed from outside**, so the
/// normal of an icosahedron face points away from the origin. Subdivision
/// keeps the winding of every child equal to its parent's.
///
/// # Example
///
/// ```
/// use xagon_types::{Point3, Triangle, TriangleId};
///
/// // One octant face of a unit octahedron, CCW seen from outside.
/// let face = Triangle::new(
///     TriangleId::new(0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
/// );
///
/// let outward = face.normal().unwrap();
/// assert!(outward.dot(&face.center_point().coords) > 0.0);
/// assert!((face.area() - 3.0_f64.sqrt() / 2.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Triangle {
    id: TriangleId,
    p1: Point3<f64>,
    p2: Point3<f64>,
    p3: Point3<f64>,
}

impl Triangle {
    /// Create a triangle from an id and three points.
    #[inline]
    #[must_use]
    pub const fn new(id: TriangleId, p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>) -> Self {
        Self { id, p1, p2, p3 }
    }

    /// Build a face from raw `[x, y, z]` coordinates, as stored in snapshots.
    ///
    /// # Example
    ///
    /// ```
    /// use xagon_types::{Triangle, TriangleId};
    ///
    /// let face = Triangle::from_arrays(TriangleId::new(3), [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]);
    /// assert_eq!(face.id().get(), 3);
    /// assert_eq!(face.p2().y, 1.0);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::from is not const
    pub fn from_arrays(id: TriangleId, p1: [f64; 3], p2: [f64; 3], p3: [f64; 3]) -> Self {
        Self {
            id,
            p1: Point3::from(p1),
            p2: Point3::from(p2),
            p3: Point3::from(p3),
        }
    }

    /// Stable identity.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> TriangleId {
        self.id
    }

    /// First vertex.
    #[inline]
    #[must_use]
    pub const fn p1(&self) -> Point3<f64> {
        self.p1
    }

    /// Second vertex.
    #[inline]
    #[must_use]
    pub const fn p2(&self) -> Point3<f64> {
        self.p2
    }

    /// Third vertex.
    #[inline]
    #[must_use]
    pub const fn p3(&self) -> Point3<f64> {
        self.p3
    }

    /// Vertices as an array, in `p1, p2, p3` order.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.p1, self.p2, self.p3]
    }

    /// Exact keys of the three vertices, in `p1, p2, p3` order.
    #[inline]
    #[must_use]
    pub fn vertex_keys(&self) -> [VertexKey; 3] {
        [
            VertexKey::new(&self.p1),
            VertexKey::new(&self.p2),
            VertexKey::new(&self.p3),
        ]
    }

    /// Exact keys of the three edges: p1→p2, p2→p3, p3→p1.
    #[must_use]
    pub fn edge_keys(&self) -> [EdgeKey; 3] {
        let [a, b, c] = self.vertex_keys();
        [EdgeKey::new(a, b), EdgeKey::new(b, c), EdgeKey::new(c, a)]
    }

    /// Mean of the three vertices. Game pieces are placed here.
    ///
    /// # Example
    ///
    /// ```
    /// use xagon_types::{Triangle, TriangleId};
    ///
    /// let face = Triangle::from_arrays(TriangleId::new(0), [3.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 3.0]);
    /// let center = face.center_point();
    /// assert_eq!([center.x, center.y, center.z], [1.0, 1.0, 1.0]);
    /// ```
    #[inline]
    #[must_use]
    pub fn center_point(&self) -> Point3<f64> {
        Point3::new(
            (self.p1.x + self.p2.x + self.p3.x) / 3.0,
            (self.p1.y + self.p2.y + self.p3.y) / 3.0,
            (self.p1.z + self.p2.z + self.p3.z) / 3.0,
        )
    }

    /// `(p2 - p1) × (p3 - p1)`: outward for CCW faces, length twice the area.
    #[inline]
    #[must_use]
    pub fn scaled_normal(&self) -> Vector3<f64> {
        (self.p2 - self.p1).cross(&(self.p3 - self.p1))
    }

    /// Outward unit normal, or `None` when the face has collapsed to a line
    /// or a point.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        self.scaled_normal().try_normalize(f64::EPSILON)
    }

    /// Surface area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        0.5 * self.scaled_normal().norm()
    }

    /// Directed edges `p1→p2`, `p2→p3`, `p3→p1`.
    #[must_use]
    pub const fn edges(&self) -> [(Point3<f64>, Point3<f64>); 3] {
        [(self.p1, self.p2), (self.p2, self.p3), (self.p3, self.p1)]
    }

    /// Edge lengths in [`edges`](Self::edges) order.
    ///
    /// # Example
    ///
    /// ```
    /// use xagon_types::{Triangle, TriangleId};
    ///
    /// let face = Triangle::from_arrays(TriangleId::new(0), [0.0, 0.0, 0.0], [3.0, 0.0, 0.0], [3.0, 4.0, 0.0]);
    /// assert_eq!(face.edge_lengths(), [3.0, 4.0, 5.0]);
    /// ```
    #[inline]
    #[must_use]
    pub fn edge_lengths(&self) -> [f64; 3] {
        [
            (self.p2 - self.p1).norm(),
            (self.p3 - self.p2).norm(),
            (self.p1 - self.p3).norm(),
        ]
    }

    /// Length of the shortest edge.
    ///
    /// Board faces are equilateral up to rounding, so this doubles as the
    /// face's edge length for scaling purposes.
    #[inline]
    #[must_use]
    pub fn shortest_edge_length(&self) -> f64 {
        self.edge_lengths().into_iter().fold(f64::INFINITY, f64::min)
    }

    /// Length of the longest edge.
    #[inline]
    #[must_use]
    pub fn longest_edge_length(&self) -> f64 {
        self.edge_lengths().into_iter().fold(0.0, f64::max)
    }

    /// Whether all three vertices are finite and pairwise distinct.
    ///
    /// # Example
    ///
    /// ```
    /// use xagon_types::{Triangle, TriangleId};
    ///
    /// let collapsed = Triangle::from_arrays(
    ///     TriangleId::new(0),
    ///     [0.0, 0.0, 0.0],
    ///     [0.0, 0.0, 0.0],
    ///     [1.0, 0.0, 0.0],
    /// );
    /// assert!(!collapsed.is_well_formed());
    /// ```
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let finite = self
            .vertices()
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
        if !finite {
            return false;
        }
        let [a, b, c] = self.vertex_keys();
        a != b && b != c && c != a
    }

    /// Index (0, 1 or 2) of the vertex whose key equals `key`.
    #[must_use]
    pub fn vertex_index(&self, key: VertexKey) -> Option<usize> {
        self.vertex_keys().iter().position(|&k| k == key)
    }
}
