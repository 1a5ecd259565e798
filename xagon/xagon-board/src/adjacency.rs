//! Triangle adjacency over welded vertices.

// Index arithmetic over board-sized collections
#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashMap;
use tracing::debug;
use xagon_types::{Point3, Triangle, VertexKey};

use crate::error::{BoardError, BoardResult};
use crate::params::EdgeMatching;

/// Adjacency information for a generation of triangles.
///
/// Vertices are first welded according to the [`EdgeMatching`] policy, then
/// every triangle is described by three welded vertex indices. Provides
/// lookups for:
/// - Triangles incident to a vertex
/// - Triangles sharing an edge
/// - Neighbors of a triangle (triangles sharing an edge with it)
///
/// Triangles are referred to by their position in the slice the index was
/// built from.
#[derive(Debug, Clone)]
pub struct AdjacencyIndex {
    /// Welded vertex indices per triangle, in `p1, p2, p3` order.
    faces: Vec<[u32; 3]>,
    /// Representative position of each welded vertex.
    positions: Vec<Point3<f64>>,
    /// Maps welded vertex index to incident triangle positions.
    vertex_to_triangles: Vec<Vec<usize>>,
    /// Maps edge (v0, v1) to triangle positions. v0 < v1.
    edge_to_triangles: HashMap<(u32, u32), Vec<usize>>,
    /// Triangles sharing an edge with each triangle.
    neighbors: Vec<Vec<usize>>,
}

impl AdjacencyIndex {
    /// Build adjacency for `triangles` under the given matching policy.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::GeometryInconsistency`] if a triangle does not
    /// have three finite, distinct vertices (also after welding), or if an
    /// edge is shared by more than two triangles.
    ///
    /// # Example
    ///
    /// ```
    /// use xagon_board::{AdjacencyIndex, EdgeMatching};
    /// use xagon_types::{Triangle, TriangleId};
    ///
    /// let triangles = [
    ///     Triangle::from_arrays(TriangleId::new(0), [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ///     Triangle::from_arrays(TriangleId::new(1), [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
    /// ];
    /// let index = AdjacencyIndex::build(&triangles, EdgeMatching::Exact)?;
    ///
    /// assert_eq!(index.neighbors(0), &[1]);
    /// assert_eq!(index.vertex_count(), 4);
    /// assert_eq!(index.boundary_edge_count(), 4);
    /// # Ok::<(), xagon_board::BoardError>(())
    /// ```
    pub fn build(triangles: &[Triangle], matching: EdgeMatching) -> BoardResult<Self> {
        let mut welder = VertexWelder::new(matching);
        let mut faces = Vec::with_capacity(triangles.len());

        for triangle in triangles {
            if !triangle.is_well_formed() {
                return Err(BoardError::inconsistency(format!(
                    "triangle {} does not have three well-formed vertices",
                    triangle.id()
                )));
            }
            let [p1, p2, p3] = triangle.vertices();
            let face = [welder.weld(&p1), welder.weld(&p2), welder.weld(&p3)];
            if face[0] == face[1] || face[1] == face[2] || face[2] == face[0] {
                return Err(BoardError::inconsistency(format!(
                    "triangle {} collapses to fewer than three vertices after welding",
                    triangle.id()
                )));
            }
            faces.push(face);
        }

        let positions = welder.into_positions();
        let mut vertex_to_triangles: Vec<Vec<usize>> = vec![Vec::new(); positions.len()];
        let mut edge_to_triangles: HashMap<(u32, u32), Vec<usize>> = HashMap::new();

        for (tri_idx, face) in faces.iter().enumerate() {
            for &v in face {
                vertex_to_triangles[v as usize].push(tri_idx);
            }
            for (a, b) in face_edges(*face) {
                edge_to_triangles
                    .entry(normalize_edge(a, b))
                    .or_default()
                    .push(tri_idx);
            }
        }

        if let Some((edge, shared)) = edge_to_triangles.iter().find(|(_, t)| t.len() > 2) {
            return Err(BoardError::inconsistency(format!(
                "edge {edge:?} is shared by {} triangles",
                shared.len()
            )));
        }

        let mut neighbors: Vec<Vec<usize>> = vec![Vec::with_capacity(3); faces.len()];
        for (tri_idx, face) in faces.iter().enumerate() {
            for (a, b) in face_edges(*face) {
                if let Some(shared) = edge_to_triangles.get(&normalize_edge(a, b)) {
                    neighbors[tri_idx].extend(shared.iter().copied().filter(|&t| t != tri_idx));
                }
            }
        }

        debug!(
            triangles = faces.len(),
            vertices = positions.len(),
            edges = edge_to_triangles.len(),
            "adjacency index built"
        );

        Ok(Self {
            faces,
            positions,
            vertex_to_triangles,
            edge_to_triangles,
            neighbors,
        })
    }

    /// Number of triangles indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Number of distinct (welded) vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_to_triangles.len()
    }

    /// Welded vertex indices of a triangle, in `p1, p2, p3` order.
    #[must_use]
    pub fn face(&self, triangle: usize) -> Option<[u32; 3]> {
        self.faces.get(triangle).copied()
    }

    /// Representative position of a welded vertex.
    #[must_use]
    pub fn vertex_position(&self, vertex: u32) -> Option<Point3<f64>> {
        self.positions.get(vertex as usize).copied()
    }

    /// Triangles incident to a vertex.
    #[must_use]
    pub fn triangles_at_vertex(&self, vertex: u32) -> &[usize] {
        self.vertex_to_triangles
            .get(vertex as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Triangles sharing the edge `v0`-`v1` (either direction).
    #[must_use]
    pub fn triangles_at_edge(&self, v0: u32, v1: u32) -> &[usize] {
        self.edge_to_triangles
            .get(&normalize_edge(v0, v1))
            .map_or(&[], Vec::as_slice)
    }

    /// Triangles sharing an edge with `triangle`.
    #[must_use]
    pub fn neighbors(&self, triangle: usize) -> &[usize] {
        self.neighbors.get(triangle).map_or(&[], Vec::as_slice)
    }

    /// Whether two triangles share an edge.
    #[must_use]
    pub fn shares_edge(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Count boundary edges (edges with exactly one triangle).
    ///
    /// A closed board has none.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_to_triangles
            .values()
            .filter(|t| t.len() == 1)
            .count()
    }

    /// Check if every edge is shared by exactly two triangles.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.edge_to_triangles.values().all(|t| t.len() == 2)
    }

    /// Whether the vertex lies on a boundary edge.
    #[must_use]
    pub fn is_boundary_vertex(&self, vertex: u32) -> bool {
        self.triangles_at_vertex(vertex).iter().any(|&t| {
            face_edges(self.faces[t])
                .into_iter()
                .filter(|&(a, b)| a == vertex || b == vertex)
                .any(|(a, b)| self.triangles_at_edge(a, b).len() == 1)
        })
    }
}

/// Normalize edge so smaller vertex index comes first.
const fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 <= v1 { (v0, v1) } else { (v1, v0) }
}

const fn face_edges(face: [u32; 3]) -> [(u32, u32); 3] {
    [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])]
}

/// Assigns welded vertex indices to positions.
enum VertexWelder {
    Exact {
        lookup: HashMap<VertexKey, u32>,
        positions: Vec<Point3<f64>>,
    },
    Tolerance {
        epsilon: f64,
        cell_size: f64,
        spatial_hash: HashMap<(i64, i64, i64), Vec<u32>>,
        positions: Vec<Point3<f64>>,
    },
}

impl VertexWelder {
    fn new(matching: EdgeMatching) -> Self {
        match matching {
            EdgeMatching::Exact => Self::Exact {
                lookup: HashMap::new(),
                positions: Vec::new(),
            },
            EdgeMatching::Tolerance { epsilon } => Self::Tolerance {
                epsilon,
                cell_size: epsilon * 2.0,
                spatial_hash: HashMap::new(),
                positions: Vec::new(),
            },
        }
    }

    fn weld(&mut self, p: &Point3<f64>) -> u32 {
        match self {
            Self::Exact { lookup, positions } => *lookup.entry(VertexKey::new(p)).or_insert_with(|| {
                positions.push(*p);
                (positions.len() - 1) as u32
            }),
            Self::Tolerance {
                epsilon,
                cell_size,
                spatial_hash,
                positions,
            } => {
                let cell = pos_to_cell(p, *cell_size);

                // Check 3x3x3 neighborhood
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        for dz in -1..=1 {
                            let neighbor_cell = (cell.0 + dx, cell.1 + dy, cell.2 + dz);
                            if let Some(candidates) = spatial_hash.get(&neighbor_cell) {
                                for &idx in candidates {
                                    if (positions[idx as usize] - p).norm() < *epsilon {
                                        return idx;
                                    }
                                }
                            }
                        }
                    }
                }

                let idx = positions.len() as u32;
                positions.push(*p);
                spatial_hash.entry(cell).or_default().push(idx);
                idx
            }
        }
    }

    fn into_positions(self) -> Vec<Point3<f64>> {
        match self {
            Self::Exact { positions, .. } | Self::Tolerance { positions, .. } => positions,
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn pos_to_cell(p: &Point3<f64>, cell_size: f64) -> (i64, i64, i64) {
    (
        (p.x / cell_size).floor() as i64,
        (p.y / cell_size).floor() as i64,
        (p.z / cell_size).floor() as i64,
    )
}
