//! Hexagon detection around a changed triangle.
//!
//! A hexagon is a ring of exactly six triangles around one shared vertex,
//! each consecutive pair sharing an edge and the last closing back onto the
//! first. On a subdivided icosahedron every vertex except the twelve
//! original corners is surrounded by such a ring; the corners have five
//! triangles and never form one.
//!
//! Groupings are never cached. Callers re-run the check after every state
//! change.

use tracing::debug;
use xagon_types::{Point3, Triangle, TriangleId};

use crate::adjacency::AdjacencyIndex;
use crate::error::{BoardError, BoardResult};
use crate::icosahedron::Icosahedron;

/// Number of triangles in a hexagon.
pub const HEXAGON_SIZE: usize = 6;

/// Six triangles forming a closed ring around a shared vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Hexagon {
    vertex: u32,
    center: Point3<f64>,
    ring: [usize; HEXAGON_SIZE],
    triangles: [TriangleId; HEXAGON_SIZE],
}

impl Hexagon {
    /// Position of the shared vertex.
    #[must_use]
    pub const fn center(&self) -> Point3<f64> {
        self.center
    }

    /// Welded index of the shared vertex in the adjacency index it came from.
    #[must_use]
    pub const fn vertex(&self) -> u32 {
        self.vertex
    }

    /// Triangle ids in ring order, starting with the triangle the check ran for.
    #[must_use]
    pub const fn triangles(&self) -> &[TriangleId; HEXAGON_SIZE] {
        &self.triangles
    }

    /// Positions of the ring's triangles in the generation they came from.
    #[must_use]
    pub const fn positions(&self) -> &[usize; HEXAGON_SIZE] {
        &self.ring
    }

    /// Whether the ring contains the triangle.
    #[must_use]
    pub fn contains(&self, id: TriangleId) -> bool {
        self.triangles.contains(&id)
    }
}

/// Find every hexagon the triangle at position `triangle` takes part in.
///
/// Each of the triangle's three vertices is evaluated. A vertex yields a
/// hexagon iff exactly six triangles are incident to it and walking across
/// shared edges around it visits all six and returns to the start. Fans of
/// five or seven triangles, and open fans, yield nothing.
///
/// `triangles` must be the slice `index` was built from.
///
/// # Errors
///
/// - [`BoardError::InvalidArgument`] if `triangle` is out of range or
///   `triangles` does not match the index.
/// - [`BoardError::GeometryInconsistency`] if an interior vertex has fewer
///   than three incident triangles, which no valid polygon fan can have.
///
/// # Example
///
/// ```
/// use xagon_board::{hexagons_verify, AdjacencyIndex, EdgeMatching};
/// use xagon_types::{Triangle, TriangleId};
///
/// // Six triangles fanned around the origin.
/// let rim: Vec<[f64; 3]> = (0..6)
///     .map(|k| {
///         let a = std::f64::consts::FRAC_PI_3 * f64::from(k);
///         [a.cos(), a.sin(), 0.0]
///     })
///     .collect();
/// let triangles: Vec<Triangle> = (0..6)
///     .map(|k| Triangle::from_arrays(TriangleId::new(k as u32), [0.0, 0.0, 0.0], rim[k], rim[(k + 1) % 6]))
///     .collect();
///
/// let index = AdjacencyIndex::build(&triangles, EdgeMatching::Exact)?;
/// let hexagons = hexagons_verify(&index, &triangles, 0)?;
///
/// assert_eq!(hexagons.len(), 1);
/// assert!(hexagons[0].contains(TriangleId::new(5)));
/// # Ok::<(), xagon_board::BoardError>(())
/// ```
pub fn hexagons_verify(
    index: &AdjacencyIndex,
    triangles: &[Triangle],
    triangle: usize,
) -> BoardResult<Vec<Hexagon>> {
    if triangles.len() != index.len() {
        return Err(BoardError::invalid_argument(format!(
            "adjacency index covers {} triangles but {} were supplied",
            index.len(),
            triangles.len()
        )));
    }
    let face = index.face(triangle).ok_or_else(|| {
        BoardError::invalid_argument(format!(
            "triangle position {triangle} out of range (0..{})",
            index.len()
        ))
    })?;

    let mut hexagons = Vec::new();
    for (corner, &vertex) in face.iter().enumerate() {
        let fan = index.triangles_at_vertex(vertex);
        if fan.len() < 3 && !index.is_boundary_vertex(vertex) {
            return Err(BoardError::inconsistency(format!(
                "interior vertex {vertex} has only {} incident triangles",
                fan.len()
            )));
        }
        if fan.len() != HEXAGON_SIZE {
            continue;
        }

        // Leave through the edge to the vertex after `vertex` in winding order.
        let entry = face[(corner + 2) % 3];
        if let Some(ring) = walk_ring(index, vertex, triangle, entry)? {
            let center = index.vertex_position(vertex).ok_or_else(|| {
                BoardError::inconsistency(format!("vertex {vertex} has no position"))
            })?;
            hexagons.push(Hexagon {
                vertex,
                center,
                triangles: ring.map(|t| triangles[t].id()),
                ring,
            });
        }
    }
    Ok(hexagons)
}

/// Walk the fan around `vertex` starting at `start`, entering through the
/// edge `vertex`-`entry`. Returns the ring if it closes after exactly six
/// triangles.
fn walk_ring(
    index: &AdjacencyIndex,
    vertex: u32,
    start: usize,
    entry: u32,
) -> BoardResult<Option<[usize; HEXAGON_SIZE]>> {
    let mut ring = [start; HEXAGON_SIZE];
    let mut len = 1;
    let mut current = start;
    let mut entry = entry;

    loop {
        let exit = exit_vertex(index, current, vertex, entry)?;
        let Some(&next) = index
            .triangles_at_edge(vertex, exit)
            .iter()
            .find(|&&t| t != current)
        else {
            // Open fan: the edge lies on a boundary.
            return Ok(None);
        };

        if next == start {
            return Ok((len == HEXAGON_SIZE).then_some(ring));
        }
        if len == HEXAGON_SIZE || ring[..len].contains(&next) {
            return Ok(None);
        }

        ring[len] = next;
        len += 1;
        entry = exit;
        current = next;
    }
}

/// The vertex of `triangle` that is neither `vertex` nor `entry`.
fn exit_vertex(index: &AdjacencyIndex, triangle: usize, vertex: u32, entry: u32) -> BoardResult<u32> {
    let face = index
        .face(triangle)
        .ok_or_else(|| BoardError::inconsistency(format!("triangle position {triangle} missing")))?;
    if !face.contains(&vertex) || !face.contains(&entry) {
        return Err(BoardError::inconsistency(format!(
            "triangle position {triangle} does not contain edge {vertex}-{entry}"
        )));
    }
    face.into_iter()
        .find(|&v| v != vertex && v != entry)
        .ok_or_else(|| {
            BoardError::inconsistency(format!("triangle position {triangle} is degenerate"))
        })
}

/// Receiver for detected hexagons.
///
/// Stands in for the rendering side's "change type" handler: implementors
/// hold whatever scene or scoring context they need and react to each
/// hexagon they are handed.
pub trait HexagonHandler {
    /// Called once per hexagon, with the six triangles in ring order.
    fn change_type(&mut self, hexagon: &Hexagon, triangles: [&Triangle; HEXAGON_SIZE]);
}

/// Collects every hexagon it is handed.
impl HexagonHandler for Vec<Hexagon> {
    fn change_type(&mut self, hexagon: &Hexagon, _triangles: [&Triangle; HEXAGON_SIZE]) {
        self.push(hexagon.clone());
    }
}

/// Hand every completed hexagon around the changed triangles to `handler`.
///
/// A hexagon shared by several changed triangles is dispatched once. Returns
/// the number of hexagons dispatched.
///
/// # Errors
///
/// Propagates [`Icosahedron::completed_hexagons`] errors. Every id is
/// checked before the first dispatch, so on error `handler` is not called.
pub fn dispatch_hexagons<H>(
    board: &Icosahedron,
    ids: &[TriangleId],
    handler: &mut H,
) -> BoardResult<usize>
where
    H: HexagonHandler + ?Sized,
{
    let mut pending: Vec<Hexagon> = Vec::new();
    for &id in ids {
        for hexagon in board.completed_hexagons(id)? {
            if pending.iter().all(|h| h.vertex() != hexagon.vertex()) {
                pending.push(hexagon);
            }
        }
    }

    for hexagon in &pending {
        let ring = hexagon.positions().map(|i| &board.triangles()[i]);
        handler.change_type(hexagon, ring);
    }
    debug!(
        changed = ids.len(),
        hexagons = pending.len(),
        "dispatched completed hexagons"
    );
    Ok(pending.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use crate::params::EdgeMatching;
    use crate::state::{PlayerId, TriangleState};
    use xagon_subdivide::StrategyKind;

    /// `n` triangles around the apex of a cone, CCW when viewed from above.
    /// The fan closes; for n != 6 the apex is lifted so the cone is valid.
    fn closed_fan(n: usize) -> Vec<Triangle> {
        let apex_z = if n == 6 { 0.0 } else { 0.5 };
        let rim: Vec<[f64; 3]> = (0..n)
            .map(|k| {
                let a = std::f64::consts::TAU * k as f64 / n as f64;
                [a.cos(), a.sin(), 0.0]
            })
            .collect();
        (0..n)
            .map(|k| {
                Triangle::from_arrays(
                    TriangleId::new(k as u32),
                    [0.0, 0.0, apex_z],
                    rim[k],
                    rim[(k + 1) % n],
                )
            })
            .collect()
    }

    fn verify(triangles: &[Triangle], at: usize) -> BoardResult<Vec<Hexagon>> {
        let index = AdjacencyIndex::build(triangles, EdgeMatching::Exact)?;
        hexagons_verify(&index, triangles, at)
    }

    #[test]
    fn test_six_ring_is_a_hexagon() {
        let triangles = closed_fan(6);
        for start in 0..6 {
            let hexagons = verify(&triangles, start).unwrap();
            assert_eq!(hexagons.len(), 1);
            let hex = &hexagons[0];
            assert_eq!(hex.triangles()[0], TriangleId::new(start as u32));
            assert_eq!(hex.center(), Point3::new(0.0, 0.0, 0.0));
            for id in 0..6 {
                assert!(hex.contains(TriangleId::new(id)));
            }
        }
    }

    #[test]
    fn test_ring_order_follows_shared_edges() {
        let triangles = closed_fan(6);
        let index = AdjacencyIndex::build(&triangles, EdgeMatching::Exact).unwrap();
        let hex = &hexagons_verify(&index, &triangles, 2).unwrap()[0];
        let ring = hex.positions();
        for k in 0..HEXAGON_SIZE {
            assert!(index.shares_edge(ring[k], ring[(k + 1) % HEXAGON_SIZE]));
        }
    }

    #[test]
    fn test_five_and_seven_rings_are_not_hexagons() {
        assert!(verify(&closed_fan(5), 0).unwrap().is_empty());
        assert!(verify(&closed_fan(7), 0).unwrap().is_empty());
    }

    #[test]
    fn test_open_fan_is_not_a_hexagon() {
        let mut triangles = closed_fan(6);
        triangles.pop();
        assert!(verify(&triangles, 0).unwrap().is_empty());
    }

    #[test]
    fn test_six_incident_that_do_not_close_is_not_a_hexagon() {
        // Two separate three-triangle fans glued at the apex only.
        let mut triangles: Vec<Triangle> = closed_fan(6).into_iter().take(3).collect();
        let mirrored: Vec<Triangle> = closed_fan(6)
            .into_iter()
            .take(3)
            .enumerate()
            .map(|(k, t)| {
                let flip = |p: Point3<f64>| [p.x, p.y, -p.z - p.x.abs() - p.y.abs()];
                Triangle::from_arrays(
                    TriangleId::new(10 + k as u32),
                    flip(t.p1()),
                    flip(t.p3()),
                    flip(t.p2()),
                )
            })
            .collect();
        triangles.extend(mirrored);

        let index = AdjacencyIndex::build(&triangles, EdgeMatching::Exact).unwrap();
        let [apex, _, _] = index.face(0).unwrap();
        assert_eq!(index.triangles_at_vertex(apex).len(), 6);
        assert!(hexagons_verify(&index, &triangles, 0).unwrap().is_empty());
    }

    #[test]
    fn test_two_face_pillow_is_geometry_inconsistency() {
        let (a, b, c) = ([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let triangles = vec![
            Triangle::from_arrays(TriangleId::new(0), a, b, c),
            Triangle::from_arrays(TriangleId::new(1), a, c, b),
        ];
        let err = verify(&triangles, 0).unwrap_err();
        assert!(err.is_geometry_inconsistency());
    }

    #[test]
    fn test_out_of_range_triangle_is_invalid_argument() {
        let triangles = closed_fan(6);
        let err = verify(&triangles, 6).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_mismatched_slice_is_invalid_argument() {
        let triangles = closed_fan(6);
        let index = AdjacencyIndex::build(&triangles, EdgeMatching::Exact).unwrap();
        let err = hexagons_verify(&index, &triangles[..5], 0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[derive(Default)]
    struct RecordingHandler {
        seen: Vec<[TriangleId; HEXAGON_SIZE]>,
    }

    impl HexagonHandler for RecordingHandler {
        fn change_type(&mut self, _hexagon: &Hexagon, triangles: [&Triangle; HEXAGON_SIZE]) {
            self.seen.push(triangles.map(Triangle::id));
        }
    }

    #[test]
    fn test_handler_receives_ring_in_order() {
        let triangles = closed_fan(6);
        let hexagons = verify(&triangles, 0).unwrap();
        let ring = hexagons[0].positions().map(|p| &triangles[p]);

        let mut handler = RecordingHandler::default();
        handler.change_type(&hexagons[0], ring);
        assert_eq!(handler.seen.len(), 1);
        assert_eq!(&handler.seen[0], hexagons[0].triangles());

        let mut collected: Vec<Hexagon> = Vec::new();
        collected.change_type(&hexagons[0], ring);
        assert_eq!(collected, hexagons);
    }

    fn claimed_ring_board() -> (Icosahedron, TriangleId) {
        let mut board = Icosahedron::new(StrategyKind::OneToFour.build()).unwrap();
        board.subdivide(1).unwrap();
        let center = board.triangles()[3].id();
        let ring = *board.hexagons_around(center).unwrap()[0].triangles();
        board
            .set_state(&ring, TriangleState::claimed_by(PlayerId(1)))
            .unwrap();
        (board, center)
    }

    #[test]
    fn test_dispatch_dedupes_shared_hexagons() {
        let (board, center) = claimed_ring_board();
        let mut handler = RecordingHandler::default();
        let count = dispatch_hexagons(&board, &[center, center], &mut handler).unwrap();
        assert_eq!(count, 1);
        assert_eq!(handler.seen.len(), 1);
        assert_eq!(handler.seen[0][0], center);
    }

    #[test]
    fn test_dispatch_with_unknown_id_calls_no_handler() {
        let (board, center) = claimed_ring_board();
        let mut collected: Vec<Hexagon> = Vec::new();
        let err = dispatch_hexagons(&board, &[center, TriangleId::new(9999)], &mut collected)
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(collected.is_empty());
    }
}
