//! Snapshot files.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};
use xagon_board::{BoardParams, Icosahedron};
use xagon_subdivide::{StrategyKind, SubdivisionStrategy};

use crate::error::{IoError, IoResult};
use crate::json::{deserialize_with_params, serialize, serialize_pretty};

/// Write the board to `path` as JSON.
///
/// # Arguments
///
/// * `board` - The board to save
/// * `path` - Output file path
/// * `pretty` - Indent the output
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_snapshot<P: AsRef<Path>>(board: &Icosahedron, path: P, pretty: bool) -> IoResult<()> {
    let path = path.as_ref();
    let text = if pretty {
        serialize_pretty(board)?
    } else {
        serialize(board)?
    };

    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;

    info!(
        path = %path.display(),
        triangles = board.len(),
        level = board.level(),
        "Saved board snapshot"
    );
    Ok(())
}

/// Read a board from a JSON snapshot at `path`.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist.
/// - [`IoError::Io`] if the file cannot be read.
/// - Anything [`deserialize`](crate::deserialize) returns.
pub fn load_snapshot<P: AsRef<Path>>(
    path: P,
    strategy: Box<dyn SubdivisionStrategy>,
    params: BoardParams,
) -> IoResult<Icosahedron> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path)?;
    let board = deserialize_with_params(&text, strategy, params)?;
    info!(
        path = %path.display(),
        triangles = board.len(),
        level = board.level(),
        "Loaded board snapshot"
    );
    Ok(board)
}

/// Load the snapshot at `path`, or build a fresh board subdivided `levels`
/// times if it is missing or unreadable.
///
/// The fallback is logged and never written back to `path`.
///
/// # Errors
///
/// Only fails if the fresh board cannot be built: invalid `params`, or
/// `levels` beyond `params.max_triangles`.
///
/// # Example
///
/// ```
/// use xagon_board::BoardParams;
/// use xagon_io::load_or_build;
/// use xagon_subdivide::StrategyKind;
///
/// let board = load_or_build("missing.json", StrategyKind::OneToFour, BoardParams::new(), 2)?;
/// assert_eq!(board.len(), 320);
/// # Ok::<(), xagon_io::IoError>(())
/// ```
pub fn load_or_build<P: AsRef<Path>>(
    path: P,
    kind: StrategyKind,
    params: BoardParams,
    levels: u32,
) -> IoResult<Icosahedron> {
    let path = path.as_ref();
    match load_snapshot(path, kind.build(), params.clone()) {
        Ok(board) => return Ok(board),
        Err(IoError::FileNotFound { .. }) => {
            info!(path = %path.display(), "No board snapshot, building a fresh board");
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable board snapshot");
        }
    }

    let mut board = Icosahedron::with_params(kind.build(), params)?;
    board.subdivide(levels)?;
    Ok(board)
}
