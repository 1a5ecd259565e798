//! Xagon board tool.
//!
//! # Commands
//!
//! - `xagon generate` - Build a subdivided board and write its snapshot
//! - `xagon info <FILE>` - Summarize a snapshot
//! - `xagon hexagons <FILE>` - List hexagons in a snapshot
//!
//! Logging goes to stderr and follows `RUST_LOG`; `--verbose` lowers the
//! default level to `debug`.

mod generate;
mod inspect;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xagon_board::BoardParams;
use xagon_subdivide::StrategyKind;

/// Generate and inspect Xagon icosahedron boards
#[derive(Parser)]
#[command(name = "xagon")]
#[command(about = "Generate and inspect Xagon icosahedron boards", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a board, subdivide it and write the snapshot
    Generate {
        /// Number of subdivision passes
        #[arg(short, long, default_value_t = 2)]
        levels: u32,

        /// Output file
        #[arg(short, long, default_value = "icosahedron.json")]
        output: PathBuf,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        board: BoardArgs,
    },

    /// Summarize a snapshot
    Info {
        /// Snapshot file
        #[arg(name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        board: BoardArgs,
    },

    /// List hexagons in a snapshot
    Hexagons {
        /// Snapshot file
        #[arg(name = "FILE")]
        file: PathBuf,

        /// Only hexagons around this triangle id
        #[arg(short, long)]
        triangle: Option<u32>,

        /// Only hexagons whose six triangles share an owner
        #[arg(long)]
        completed: bool,

        #[command(flatten)]
        board: BoardArgs,
    },
}

/// Options shared by every command that builds or loads a board.
#[derive(Args)]
struct BoardArgs {
    /// Subdivision strategy: naive or 1to4
    #[arg(short, long, default_value = "1to4")]
    strategy: StrategyKind,

    /// JSON file with board parameters
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl BoardArgs {
    fn params(&self) -> Result<BoardParams> {
        self.config
            .as_deref()
            .map_or_else(|| Ok(BoardParams::default()), load_params)
    }
}

fn load_params(path: &Path) -> Result<BoardParams> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading board config {}", path.display()))?;
    let params: BoardParams = serde_json::from_str(&text)
        .with_context(|| format!("parsing board config {}", path.display()))?;
    params.validate()?;
    Ok(params)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            levels,
            output,
            pretty,
            board,
        } => generate::run(board.strategy, &board.params()?, levels, &output, pretty),
        Commands::Info { file, board } => {
            inspect::info(&file, board.strategy, &board.params()?)
        }
        Commands::Hexagons {
            file,
            triangle,
            completed,
            board,
        } => inspect::hexagons(&file, board.strategy, &board.params()?, triangle, completed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;
    use xagon_board::EdgeMatching;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_strategy_flag_parses() {
        let cli = Cli::try_parse_from(["xagon", "info", "board.json", "--strategy", "naive"])
            .unwrap();
        let Commands::Info { board, .. } = cli.command else {
            panic!("expected info");
        };
        assert_eq!(board.strategy, StrategyKind::Naive);

        assert!(Cli::try_parse_from(["xagon", "info", "b.json", "-s", "loop"]).is_err());
    }

    #[test]
    fn test_config_file_sets_params() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.json");
        fs::write(&path, r#"{"edge_matching":{"policy":"exact"},"max_triangles":320}"#).unwrap();

        let params = load_params(&path).unwrap();
        assert_eq!(params.edge_matching, EdgeMatching::Exact);
        assert_eq!(params.max_triangles, 320);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.json");
        fs::write(&path, r#"{"max_triangles":3}"#).unwrap();
        assert!(load_params(&path).is_err());
    }
}
