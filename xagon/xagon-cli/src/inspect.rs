//! `xagon info` and `xagon hexagons`

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;
use xagon_board::{BoardParams, Hexagon, Icosahedron};
use xagon_subdivide::StrategyKind;
use xagon_types::TriangleId;

fn load(file: &Path, kind: StrategyKind, params: &BoardParams) -> Result<Icosahedron> {
    xagon_io::load_snapshot(file, kind.build(), params.clone())
        .with_context(|| format!("loading {}", file.display()))
}

/// Every hexagon on the board, keyed by its center vertex.
fn all_hexagons(board: &Icosahedron) -> Result<BTreeMap<u32, Hexagon>> {
    let mut hexagons = BTreeMap::new();
    for t in board.triangles() {
        for hex in board.hexagons_around(t.id())? {
            hexagons.entry(hex.vertex()).or_insert(hex);
        }
    }
    Ok(hexagons)
}

/// Print a summary of the snapshot at `file`.
pub fn info(file: &Path, kind: StrategyKind, params: &BoardParams) -> Result<()> {
    let board = load(file, kind, params)?;
    let index = board.adjacency();
    let hexagons = all_hexagons(&board)?;

    println!("{}", format!("Board {}", file.display()).bold());
    println!("  {:16} {}", "Triangles", board.len());
    println!("  {:16} {}", "Level", board.level());
    println!("  {:16} {}", "Vertices", index.vertex_count());
    println!("  {:16} {}", "Edges", index.edge_count());
    println!("  {:16} {}", "Hexagons", hexagons.len());
    println!("  {:16} {:.6}", "Shortest edge", board.shortest_edge_length());
    println!("  {:16} {:.6}", "Total area", board.total_area());
    println!("  {:16} {}", "Next id", board.next_id());
    if index.is_watertight() {
        println!("  {:16} {}", "Watertight", "yes".green());
    } else {
        println!(
            "  {:16} {} ({} boundary edges)",
            "Watertight",
            "no".red(),
            index.boundary_edge_count()
        );
    }
    Ok(())
}

/// Print the hexagons of the snapshot at `file`, optionally only those
/// around one triangle and only completed ones.
pub fn hexagons(
    file: &Path,
    kind: StrategyKind,
    params: &BoardParams,
    triangle: Option<u32>,
    completed: bool,
) -> Result<()> {
    let board = load(file, kind, params)?;

    let hexagons: Vec<Hexagon> = match triangle {
        Some(raw) => {
            let id = TriangleId::new(raw);
            if board.triangle(id).is_none() {
                bail!("no triangle {id} in {}", file.display());
            }
            if completed {
                board.completed_hexagons(id)?
            } else {
                board.hexagons_around(id)?
            }
        }
        // A freshly loaded board has no owners, so nothing is completed.
        None if completed => Vec::new(),
        None => all_hexagons(&board)?.into_values().collect(),
    };

    for hex in &hexagons {
        let c = hex.center();
        let ids: Vec<String> = hex.triangles().iter().map(ToString::to_string).collect();
        println!(
            "{} ({:.6}, {:.6}, {:.6})  {}",
            format!("v{}", hex.vertex()).cyan(),
            c.x,
            c.y,
            c.z,
            ids.join(" ")
        );
    }
    println!("{} hexagons", hexagons.len().bold());
    Ok(())
}
