//! The board aggregate.

use std::fmt;

use hashbrown::HashMap;
use tracing::{debug, info};
use xagon_subdivide::{
    expected_triangles, subdivide_triangles, StrategyKind, SubdivisionLevel, SubdivisionStrategy,
};
use xagon_types::{Point3, Triangle, TriangleId, TriangleIdSequence};

use crate::adjacency::AdjacencyIndex;
use crate::error::{BoardError, BoardResult};
use crate::hexagon::{hexagons_verify, Hexagon};
use crate::params::BoardParams;
use crate::state::{ObserverId, TriangleChange, TriangleState};

/// Number of faces of the unsubdivided board.
pub const BASE_FACES: usize = 20;

/// Asset size relative to the face it sits on.
const ASSET_FILL: f64 = 0.9;

const FACE_INDICES: [[usize; 3]; BASE_FACES] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

type Observer = Box<dyn FnMut(&Icosahedron, &TriangleChange)>;

/// The 20 faces of a regular icosahedron inscribed in the unit sphere.
///
/// Faces wind counter-clockwise seen from outside and take ids `0..20`.
///
/// # Example
///
/// ```
/// use xagon_board::base_faces;
///
/// let faces = base_faces();
/// assert_eq!(faces.len(), 20);
/// for face in &faces {
///     let n = face.normal().unwrap();
///     assert!(n.dot(&face.center_point().coords) > 0.0);
/// }
/// ```
#[must_use]
pub fn base_faces() -> Vec<Triangle> {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let scale = (1.0 + phi * phi).sqrt();
    let (one, phi) = (1.0 / scale, phi / scale);

    let vertices = [
        Point3::new(-one, phi, 0.0),
        Point3::new(one, phi, 0.0),
        Point3::new(-one, -phi, 0.0),
        Point3::new(one, -phi, 0.0),
        Point3::new(0.0, -one, phi),
        Point3::new(0.0, one, phi),
        Point3::new(0.0, -one, -phi),
        Point3::new(0.0, one, -phi),
        Point3::new(phi, 0.0, -one),
        Point3::new(phi, 0.0, one),
        Point3::new(-phi, 0.0, -one),
        Point3::new(-phi, 0.0, one),
    ];

    FACE_INDICES
        .iter()
        .zip(0_u32..)
        .map(|(&[a, b, c], id)| {
            Triangle::new(TriangleId::new(id), vertices[a], vertices[b], vertices[c])
        })
        .collect()
}

/// An icosahedron subdivided into triangular faces, with per-face game state.
///
/// Owns the current generation of triangles, the injected subdivision
/// strategy, an adjacency index over the current generation, and the
/// observers notified when face state changes. Subdivision is planar:
/// children tile their parent exactly, so the total area never changes.
///
/// Observers run synchronously, in registration order, inside the call that
/// changed state. They see the board but cannot mutate it.
///
/// # Example
///
/// ```
/// use xagon_board::{Icosahedron, PlayerId, TriangleState};
/// use xagon_subdivide::StrategyKind;
///
/// let mut board = Icosahedron::new(StrategyKind::OneToFour.build())?;
/// board.subdivide(2)?;
/// assert_eq!(board.len(), 320);
///
/// let first = board.triangles()[0].id();
/// board.set_state(&[first], TriangleState::claimed_by(PlayerId(1)))?;
/// assert!(board.state(first).unwrap().is_claimed());
/// # Ok::<(), xagon_board::BoardError>(())
/// ```
pub struct Icosahedron {
    triangles: Vec<Triangle>,
    positions: HashMap<TriangleId, usize>,
    states: Vec<TriangleState>,
    adjacency: AdjacencyIndex,
    strategy: Box<dyn SubdivisionStrategy>,
    params: BoardParams,
    level: u32,
    ids: TriangleIdSequence,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl Icosahedron {
    /// Build the 20-face board with default parameters.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::with_params`] errors.
    pub fn new(strategy: Box<dyn SubdivisionStrategy>) -> BoardResult<Self> {
        Self::with_params(strategy, BoardParams::default())
    }

    /// Build the 20-face board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidArgument`] if `params` do not validate.
    pub fn with_params(
        strategy: Box<dyn SubdivisionStrategy>,
        params: BoardParams,
    ) -> BoardResult<Self> {
        params.validate()?;
        let triangles = base_faces();
        let adjacency = AdjacencyIndex::build(&triangles, params.edge_matching)?;
        let ids = ids_after(&triangles);
        Ok(Self::assemble(triangles, adjacency, strategy, params, 0, ids))
    }

    /// Rebuild a board from a restored generation of triangles.
    ///
    /// The level is inferred when the count is `20 * 4^n` and is 0
    /// otherwise. New ids continue after the largest restored id.
    ///
    /// # Errors
    ///
    /// - [`BoardError::InvalidArgument`] if `triangles` is empty, holds a
    ///   duplicate id, exceeds `max_triangles`, or `params` do not validate.
    /// - [`BoardError::GeometryInconsistency`] if the adjacency index cannot
    ///   be built.
    pub fn from_parts(
        triangles: Vec<Triangle>,
        strategy: Box<dyn SubdivisionStrategy>,
        params: BoardParams,
    ) -> BoardResult<Self> {
        params.validate()?;
        if triangles.is_empty() {
            return Err(BoardError::invalid_argument("board has no triangles"));
        }
        if triangles.len() > params.max_triangles {
            return Err(BoardError::invalid_argument(format!(
                "{} triangles exceed the maximum of {}",
                triangles.len(),
                params.max_triangles
            )));
        }

        let mut seen = HashMap::with_capacity(triangles.len());
        for (i, t) in triangles.iter().enumerate() {
            if let Some(first) = seen.insert(t.id(), i) {
                return Err(BoardError::invalid_argument(format!(
                    "duplicate triangle id {} at positions {first} and {i}",
                    t.id()
                )));
            }
        }

        let adjacency = AdjacencyIndex::build(&triangles, params.edge_matching)?;
        let ids = ids_after(&triangles);
        let level = (0..=u32::BITS / 2)
            .find(|&n| expected_triangles(BASE_FACES, n) == Some(triangles.len()))
            .unwrap_or(0);

        debug!(
            triangles = triangles.len(),
            level, "restored board from parts"
        );
        Ok(Self::assemble(triangles, adjacency, strategy, params, level, ids))
    }

    fn assemble(
        triangles: Vec<Triangle>,
        adjacency: AdjacencyIndex,
        strategy: Box<dyn SubdivisionStrategy>,
        params: BoardParams,
        level: u32,
        ids: TriangleIdSequence,
    ) -> Self {
        let positions = index_positions(&triangles);
        Self {
            states: vec![TriangleState::default(); triangles.len()],
            triangles,
            positions,
            adjacency,
            strategy,
            params,
            level,
            ids,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Subdivide every current triangle `levels` times.
    ///
    /// Passes compound: each applies to the generation the previous one
    /// produced. The triangle set, adjacency index and state are replaced
    /// together; game state starts over for the new generation. Level 0 is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// - [`BoardError::InvalidArgument`] if the result would exceed
    ///   `max_triangles`. The board is left untouched.
    /// - [`BoardError::GeometryInconsistency`] if the new generation cannot
    ///   be indexed. The board is left untouched.
    pub fn subdivide(&mut self, levels: impl Into<SubdivisionLevel>) -> BoardResult<()> {
        let levels = levels.into().get();
        if levels == 0 {
            return Ok(());
        }

        let result = subdivide_triangles(
            &self.triangles,
            self.strategy.as_ref(),
            self.ids,
            levels,
            self.params.max_triangles,
        )?;
        let adjacency = AdjacencyIndex::build(&result.triangles, self.params.edge_matching)?;

        self.positions = index_positions(&result.triangles);
        self.states = vec![TriangleState::default(); result.triangles.len()];
        self.triangles = result.triangles;
        self.adjacency = adjacency;
        self.ids = result.next_ids;
        self.level = self.level.saturating_add(levels);

        info!(
            strategy = self.strategy.name(),
            level = self.level,
            triangles = self.triangles.len(),
            vertices = self.adjacency.vertex_count(),
            "Subdivided board"
        );
        Ok(())
    }

    /// The current generation, in subdivision output order.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Look up a triangle by id.
    #[must_use]
    pub fn triangle(&self, id: TriangleId) -> Option<&Triangle> {
        self.position(id).map(|i| &self.triangles[i])
    }

    /// Position of a triangle in [`Self::triangles`].
    #[must_use]
    pub fn position(&self, id: TriangleId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Number of triangles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Always false; a board has at least one triangle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Total number of subdivision passes applied.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// The injected strategy.
    #[must_use]
    pub fn strategy(&self) -> &dyn SubdivisionStrategy {
        self.strategy.as_ref()
    }

    /// The built-in kind of the injected strategy, if it is one.
    #[must_use]
    pub fn strategy_kind(&self) -> Option<StrategyKind> {
        self.strategy.kind()
    }

    /// Board parameters.
    #[must_use]
    pub const fn params(&self) -> &BoardParams {
        &self.params
    }

    /// Adjacency over the current generation.
    #[must_use]
    pub const fn adjacency(&self) -> &AdjacencyIndex {
        &self.adjacency
    }

    /// Id the next subdivision pass will start from, `u32::MAX + 1` once the
    /// id space is used up.
    #[must_use]
    pub const fn next_id(&self) -> u64 {
        self.ids.peek()
    }

    /// Shortest edge over all current triangles.
    #[must_use]
    pub fn shortest_edge_length(&self) -> f64 {
        self.triangles
            .iter()
            .map(Triangle::shortest_edge_length)
            .fold(f64::INFINITY, f64::min)
    }

    /// Summed area of all current triangles.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.triangles.iter().map(Triangle::area).sum()
    }

    /// Uniform scale for an asset of bounding radius `asset_radius` so it
    /// fits on the smallest face.
    ///
    /// The asset's footprint is taken as the equilateral triangle inscribed
    /// in its radius, with side `radius * 3 / sqrt(3)`; the ratio maps that
    /// side onto 90% of the shortest board edge.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidArgument`] if `asset_radius` is not a
    /// positive finite number.
    pub fn scaling_ratio(&self, asset_radius: f64) -> BoardResult<f64> {
        if !(asset_radius.is_finite() && asset_radius > 0.0) {
            return Err(BoardError::invalid_argument(format!(
                "asset radius must be positive and finite, got {asset_radius}"
            )));
        }
        let side = asset_radius * 3.0 / 3.0_f64.sqrt();
        Ok(self.shortest_edge_length() / side * ASSET_FILL)
    }

    /// Game state of a triangle.
    #[must_use]
    pub fn state(&self, id: TriangleId) -> Option<TriangleState> {
        self.position(id).map(|i| self.states[i])
    }

    /// Register an observer for state changes.
    pub fn register_on_triangle_changed<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&Icosahedron, &TriangleChange) + 'static,
    {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns whether it was registered.
    pub fn unregister_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Give every listed triangle `state`, then notify observers once.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidArgument`] if any id is unknown. No state
    /// changes and no observer runs in that case.
    pub fn set_state(&mut self, ids: &[TriangleId], state: TriangleState) -> BoardResult<()> {
        let positions = ids
            .iter()
            .map(|&id| {
                self.position(id)
                    .ok_or_else(|| BoardError::invalid_argument(format!("unknown triangle {id}")))
            })
            .collect::<BoardResult<Vec<_>>>()?;

        for &i in &positions {
            self.states[i] = state;
        }
        let change = TriangleChange {
            triangles: positions.iter().map(|&i| self.triangles[i]).collect(),
            state,
        };
        self.notify(&change);
        Ok(())
    }

    fn notify(&mut self, change: &TriangleChange) {
        // Observers borrow the board immutably while they hold `&mut` to
        // themselves, so the list is moved out for the duration.
        let mut observers = std::mem::take(&mut self.observers);
        for (_, observer) in &mut observers {
            observer(self, change);
        }
        self.observers = observers;
    }

    /// Every hexagon the triangle takes part in, regardless of owners.
    ///
    /// # Errors
    ///
    /// - [`BoardError::InvalidArgument`] if the id is unknown.
    /// - [`BoardError::GeometryInconsistency`] from [`hexagons_verify`].
    pub fn hexagons_around(&self, id: TriangleId) -> BoardResult<Vec<Hexagon>> {
        let position = self
            .position(id)
            .ok_or_else(|| BoardError::invalid_argument(format!("unknown triangle {id}")))?;
        hexagons_verify(&self.adjacency, &self.triangles, position)
    }

    /// Hexagons around the triangle whose six faces share one owner.
    ///
    /// # Errors
    ///
    /// Same as [`Self::hexagons_around`].
    pub fn completed_hexagons(&self, id: TriangleId) -> BoardResult<Vec<Hexagon>> {
        let mut hexagons = self.hexagons_around(id)?;
        hexagons.retain(|hex| {
            let [first, rest @ ..] = hex.positions().map(|i| self.states[i].owner);
            first.is_some() && rest.iter().all(|&owner| owner == first)
        });
        Ok(hexagons)
    }
}

impl fmt::Debug for Icosahedron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icosahedron")
            .field("strategy", &self.strategy.name())
            .field("level", &self.level)
            .field("triangles", &self.triangles.len())
            .field("vertices", &self.adjacency.vertex_count())
            .field("params", &self.params)
            .field("next_id", &self.ids.peek())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

fn index_positions(triangles: &[Triangle]) -> HashMap<TriangleId, usize> {
    triangles
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id(), i))
        .collect()
}

fn ids_after(triangles: &[Triangle]) -> TriangleIdSequence {
    triangles
        .iter()
        .map(Triangle::id)
        .max()
        .map_or_else(TriangleIdSequence::new, TriangleIdSequence::after)
}
