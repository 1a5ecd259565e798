//! `xagon generate`

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::info;
use xagon_board::{BoardParams, Icosahedron};
use xagon_subdivide::StrategyKind;

/// Build a board with `levels` passes of `kind` and save it to `output`.
pub fn run(
    kind: StrategyKind,
    params: &BoardParams,
    levels: u32,
    output: &Path,
    pretty: bool,
) -> Result<()> {
    let board = build(kind, params, levels)?;
    xagon_io::save_snapshot(&board, output, pretty)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "{} {} triangles ({} level {}) -> {}",
        "Generated".green().bold(),
        board.len(),
        kind,
        board.level(),
        output.display()
    );
    Ok(())
}

fn build(kind: StrategyKind, params: &BoardParams, levels: u32) -> Result<Icosahedron> {
    let mut board = Icosahedron::with_params(kind.build(), params.clone())?;
    board
        .subdivide(levels)
        .with_context(|| format!("subdividing {levels} levels"))?;
    info!(
        strategy = %kind,
        vertices = board.adjacency().vertex_count(),
        shortest_edge = board.shortest_edge_length(),
        "Board ready"
    );
    Ok(board)
}
