//! The Xagon game board.
//!
//! An icosahedron subdivided into triangular faces. Players claim faces;
//! six faces around one vertex form a hexagon, and a hexagon whose faces
//! all belong to one player is completed.
//!
//! - [`Icosahedron`]: the board aggregate. Owns the triangles, the injected
//!   subdivision strategy, per-face state and change observers.
//! - [`AdjacencyIndex`]: vertex, edge and neighbor lookups over one
//!   generation, with exact or tolerance-based vertex matching.
//! - [`hexagons_verify`]: hexagon detection around a face.
//! - [`FrameHook`]: per-frame integration point for a rendering host.
//!
//! # Example
//!
//! ```
//! use xagon_board::{Icosahedron, PlayerId, TriangleState};
//! use xagon_subdivide::StrategyKind;
//!
//! let mut board = Icosahedron::new(StrategyKind::OneToFour.build())?;
//! board.subdivide(1)?;
//!
//! // The central child of the first base face touches three hexagons.
//! let center = board.triangles()[3].id();
//! let hexagons = board.hexagons_around(center)?;
//! assert_eq!(hexagons.len(), 3);
//!
//! board.set_state(hexagons[0].triangles(), TriangleState::claimed_by(PlayerId(1)))?;
//! assert_eq!(board.completed_hexagons(center)?.len(), 1);
//! # Ok::<(), xagon_board::BoardError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod adjacency;
mod error;
mod frame;
mod hexagon;
mod icosahedron;
mod params;
mod state;

pub use adjacency::AdjacencyIndex;
pub use error::{BoardError, BoardResult};
pub use frame::{FaceTransform, FaceTransforms, FrameHook};
pub use hexagon::{dispatch_hexagons, hexagons_verify, Hexagon, HexagonHandler, HEXAGON_SIZE};
pub use icosahedron::{base_faces, Icosahedron, BASE_FACES};
pub use params::{BoardParams, EdgeMatching, DEFAULT_EDGE_EPSILON, DEFAULT_MAX_TRIANGLES};
pub use state::{ObserverId, PlayerId, TriangleChange, TriangleKind, TriangleState};
