//! Triangle subdivision strategies for the Xagon board.
//!
//! Every strategy splits a triangle into four: one corner triangle per
//! vertex plus the central triangle spanned by the edge midpoints.
//!
//! - **Naive**: each triangle computes its own midpoints. Neighbors can
//!   disagree in the last bits, so adjacency needs a tolerance.
//! - **1-to-4**: midpoints are shared through a cache scoped to one pass,
//!   so neighbors receive bit-identical points.
//!
//! # Examples
//!
//! ```
//! use xagon_subdivide::{subdivide_once, StrategyKind};
//! use xagon_types::{Triangle, TriangleId, TriangleIdSequence};
//!
//! let tri = Triangle::from_arrays(
//!     TriangleId::new(0),
//!     [0.0, 0.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [0.5, 1.0, 0.0],
//! );
//!
//! let strategy = StrategyKind::OneToFour.build();
//! let (children, ids) = subdivide_once(&[tri], strategy.as_ref(), TriangleIdSequence::starting_at(1))?;
//!
//! assert_eq!(children.len(), 4);
//! assert_eq!(ids.peek(), 5);
//! # Ok::<(), xagon_subdivide::SubdivideError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod pass;
mod result;
mod strategy;
mod subdivide;

pub use error::{SubdivideError, SubdivideResult};
pub use pass::SubdivisionPass;
pub use result::SubdivisionResult;
pub use strategy::{NaiveSubdivision, OneToFourSubdivision, StrategyKind, SubdivisionStrategy};
pub use subdivide::{expected_triangles, subdivide_once, subdivide_triangles, SubdivisionLevel};
