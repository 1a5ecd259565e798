//! JSON snapshot text.
//!
//! ```json
//! {"triangles":[{"id":0,"p1":[x,y,z],"p2":[x,y,z],"p3":[x,y,z]}, ...]}
//! ```
//!
//! Triangles appear in board order. Coordinates round-trip bit for bit.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;
use xagon_board::{BoardParams, Icosahedron};
use xagon_subdivide::SubdivisionStrategy;
use xagon_types::{Triangle, TriangleId};

use crate::error::{IoError, IoResult};

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    triangles: Vec<TriangleRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TriangleRecord {
    id: TriangleId,
    p1: [f64; 3],
    p2: [f64; 3],
    p3: [f64; 3],
}

impl From<&Triangle> for TriangleRecord {
    fn from(t: &Triangle) -> Self {
        let [p1, p2, p3] = t.vertices().map(|p| [p.x, p.y, p.z]);
        Self {
            id: t.id(),
            p1,
            p2,
            p3,
        }
    }
}

impl From<TriangleRecord> for Triangle {
    fn from(r: TriangleRecord) -> Self {
        Self::from_arrays(r.id, r.p1, r.p2, r.p3)
    }
}

fn snapshot_of(board: &Icosahedron) -> Snapshot {
    Snapshot {
        triangles: board.triangles().iter().map(TriangleRecord::from).collect(),
    }
}

/// Serialize the board's triangles as compact JSON.
///
/// # Errors
///
/// Returns [`IoError::Parse`] if `serde_json` rejects the document.
pub fn serialize(board: &Icosahedron) -> IoResult<String> {
    Ok(serde_json::to_string(&snapshot_of(board))?)
}

/// Serialize the board's triangles as indented JSON.
///
/// # Errors
///
/// Same as [`serialize`].
pub fn serialize_pretty(board: &Icosahedron) -> IoResult<String> {
    Ok(serde_json::to_string_pretty(&snapshot_of(board))?)
}

/// Restore a board from JSON text, using `strategy` for later subdivision.
///
/// # Errors
///
/// - [`IoError::Parse`] if the text is malformed or truncated, lists no
///   triangles, or repeats a triangle id.
/// - [`IoError::Board`] if the triangles do not form a valid board.
///
/// # Example
///
/// ```
/// use xagon_io::{deserialize, serialize};
/// use xagon_board::Icosahedron;
/// use xagon_subdivide::StrategyKind;
///
/// let board = Icosahedron::new(StrategyKind::OneToFour.build())?;
/// let text = serialize(&board)?;
///
/// let restored = deserialize(&text, StrategyKind::OneToFour.build())?;
/// assert_eq!(restored.triangles(), board.triangles());
/// # Ok::<(), xagon_io::IoError>(())
/// ```
pub fn deserialize(text: &str, strategy: Box<dyn SubdivisionStrategy>) -> IoResult<Icosahedron> {
    deserialize_with_params(text, strategy, BoardParams::default())
}

/// [`deserialize`] with explicit board parameters.
///
/// # Errors
///
/// Same as [`deserialize`].
pub fn deserialize_with_params(
    text: &str,
    strategy: Box<dyn SubdivisionStrategy>,
    params: BoardParams,
) -> IoResult<Icosahedron> {
    let snapshot: Snapshot = serde_json::from_str(text)?;
    if snapshot.triangles.is_empty() {
        return Err(IoError::parse("snapshot lists no triangles"));
    }

    let mut seen = HashSet::with_capacity(snapshot.triangles.len());
    for record in &snapshot.triangles {
        if !seen.insert(record.id) {
            return Err(IoError::parse(format!("duplicate triangle id {}", record.id)));
        }
    }

    let triangles: Vec<Triangle> = snapshot.triangles.into_iter().map(Triangle::from).collect();
    debug!(triangles = triangles.len(), "parsed snapshot");
    Ok(Icosahedron::from_parts(triangles, strategy, params)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use xagon_subdivide::StrategyKind;

    fn strategy() -> Box<dyn SubdivisionStrategy> {
        StrategyKind::OneToFour.build()
    }

    #[test]
    fn test_compact_format_matches_documented_shape() {
        let board = Icosahedron::new(strategy()).unwrap();
        let text = serialize(&board).unwrap();
        assert!(text.starts_with(r#"{"triangles":[{"id":0,"p1":["#));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let triangles = value["triangles"].as_array().unwrap();
        assert_eq!(triangles.len(), 20);
        assert_eq!(triangles[19]["id"], 19);
        assert_eq!(triangles[0]["p3"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_round_trip_keeps_ids_coordinates_and_order() {
        let mut board = Icosahedron::new(StrategyKind::Naive.build()).unwrap();
        board.subdivide(2).unwrap();

        for text in [serialize(&board).unwrap(), serialize_pretty(&board).unwrap()] {
            let restored = deserialize(&text, StrategyKind::Naive.build()).unwrap();
            assert_eq!(restored.triangles(), board.triangles());
            assert_eq!(restored.level(), 2);
            assert_eq!(restored.strategy_kind(), Some(StrategyKind::Naive));
        }
    }

    #[test]
    fn test_restored_board_keeps_subdividing_with_fresh_ids() {
        let mut board = Icosahedron::new(strategy()).unwrap();
        board.subdivide(1).unwrap();
        let mut restored = deserialize(&serialize(&board).unwrap(), strategy()).unwrap();

        board.subdivide(1).unwrap();
        restored.subdivide(1).unwrap();
        assert_eq!(restored.triangles(), board.triangles());
    }

    #[test]
    fn test_malformed_and_truncated_text_is_parse_error() {
        let board = Icosahedron::new(strategy()).unwrap();
        let text = serialize(&board).unwrap();

        for bad in [
            "",
            "not json",
            &text[..text.len() / 2],
            r#"{"triangles":[{"id":0,"p1":[0,0],"p2":[1,0,0],"p3":[0,1,0]}]}"#,
            r#"{"faces":[]}"#,
        ] {
            let err = deserialize(bad, strategy()).unwrap_err();
            assert!(err.is_parse(), "{bad:?} gave {err}");
        }
    }

    #[test]
    fn test_empty_triangle_list_is_parse_error() {
        let err = deserialize(r#"{"triangles":[]}"#, strategy()).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_duplicate_ids_are_parse_error() {
        let text = r#"{"triangles":[
            {"id":4,"p1":[0,0,0],"p2":[1,0,0],"p3":[0,1,0]},
            {"id":4,"p1":[1,0,0],"p2":[1,1,0],"p3":[0,1,0]}
        ]}"#;
        let err = deserialize(text, strategy()).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("#4"));
    }

    #[test]
    fn test_degenerate_triangle_is_board_error() {
        let text = r#"{"triangles":[{"id":0,"p1":[0,0,0],"p2":[0,0,0],"p3":[0,1,0]}]}"#;
        let err = deserialize(text, strategy()).unwrap_err();
        assert!(matches!(err, IoError::Board(ref e) if e.is_geometry_inconsistency()));
    }
}
