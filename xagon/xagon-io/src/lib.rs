//! Board snapshots for Xagon.
//!
//! A snapshot is the current generation of triangles as JSON: ids and
//! vertex coordinates in board order. Game state and observers are not
//! part of it. Restoring takes the subdivision strategy to use from then on.
//!
//! # Example
//!
//! ```no_run
//! use xagon_board::BoardParams;
//! use xagon_io::{load_or_build, save_snapshot};
//! use xagon_subdivide::StrategyKind;
//!
//! // Load a saved board, or generate one with two subdivision passes.
//! let board = load_or_build("icosahedron.json", StrategyKind::OneToFour, BoardParams::new(), 2)?;
//!
//! save_snapshot(&board, "icosahedron.json", false)?;
//! # Ok::<(), xagon_io::IoError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod file;
mod json;

pub use error::{IoError, IoResult};
pub use file::{load_or_build, load_snapshot, save_snapshot};
pub use json::{deserialize, deserialize_with_params, serialize, serialize_pretty};
