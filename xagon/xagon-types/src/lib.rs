//! Geometry primitives for the Xagon board.
//!
//! This crate provides the foundational value types shared by the
//! subdivision, board and snapshot crates:
//!
//! - [`Point3`] - A vertex position (re-exported from nalgebra)
//! - [`Triangle`] - A face with a stable [`TriangleId`] and three ordered vertices
//! - [`VertexKey`] / [`EdgeKey`] - Canonical, hashable identities for vertices and edges
//! - [`TriangleIdSequence`] - Monotonic allocator for triangle ids
//!
//! # Units
//!
//! All coordinates are `f64`. The base icosahedron is inscribed in the unit
//! sphere, so coordinates stay within `[-1, 1]`.
//!
//! # Vertex Order
//!
//! A triangle's vertices are stored as `p1, p2, p3` and no operation ever
//! reorders them. Downstream consumers (face orientation on the rendering
//! side, ring walking in adjacency queries) rely on this.
//!
//! # Example
//!
//! ```
//! use xagon_types::{Point3, Triangle, TriangleId};
//!
//! let tri = Triangle::new(
//!     TriangleId::new(7),
//!     Point3::new(0.0, 0.0, 1.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! );
//!
//! assert_eq!(tri.id().get(), 7);
//! assert_eq!(tri.vertices()[0], Point3::new(0.0, 0.0, 1.0));
//! assert!(tri.shortest_edge_length() > 1.414);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod id;
mod point;
mod triangle;

pub use id::{TriangleId, TriangleIdSequence};
pub use point::{midpoint, EdgeKey, VertexKey};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
