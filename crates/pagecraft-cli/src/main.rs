//! pagecraft binary.
//!
//! Inspect and edit saved page documents (the JSON block array) from the
//! shell.
//!
//! ## Usage
//!
//! ```bash
//! pagecraft tree page.json --depth 2
//! pagecraft find page.json --type button
//! pagecraft find page.json --path 0-1
//! pagecraft css page.json hero --breakpoint xs
//! pagecraft duplicate page.json hero --output copy.json
//! pagecraft delete page.json cta
//! pagecraft check page.json
//! ```
//!
//! Logs go to stderr (`RUST_LOG` or `--verbose`), results to stdout.

mod config;
mod render;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pagecraft_tree::{Block, BlockKind, BlockPath, BlockTree, Breakpoint};
use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, load_config};

/// Inspect and edit pagecraft block documents.
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(about = "Inspect and edit pagecraft block documents")]
struct Cli {
    /// Config file (default: ~/.config/pagecraft/pagecraft.ron)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the block tree
    Tree {
        file: PathBuf,
        /// Deepest level to print (0 = root blocks only)
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Print matching blocks as JSON
    Find {
        file: PathBuf,
        #[command(flatten)]
        target: FindTarget,
    },
    /// Print a block's resolved CSS at a breakpoint
    Css {
        file: PathBuf,
        id: String,
        #[arg(short, long)]
        breakpoint: Option<Breakpoint>,
    },
    /// Duplicate a block (fresh ids) right after the original
    Duplicate {
        file: PathBuf,
        id: String,
        /// Write here instead of overwriting FILE
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete a block and its subtree
    Delete {
        file: PathBuf,
        id: String,
        /// Write here instead of overwriting FILE
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check that block ids are unique
    Check { file: PathBuf },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct FindTarget {
    /// Block id
    #[arg(long)]
    id: Option<String>,
    /// Block type (every match)
    #[arg(long = "type")]
    kind: Option<BlockKind>,
    /// Dash-separated index path, e.g. 0-2-1
    #[arg(long)]
    path: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("command failed: {:?}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Tree { file, depth } => {
            let tree = read_tree(&file)?;
            for line in render::format_tree(&tree, depth.or(config.tree_depth)) {
                writeln!(out, "{}", line)?;
            }
            writeln!(out, "{} blocks", tree.block_count())?;
        }
        Command::Find { file, target } => {
            let tree = read_tree(&file)?;
            let found: Vec<&Block> = if let Some(id) = &target.id {
                tree.find_by_id(id).into_iter().collect()
            } else if let Some(kind) = target.kind {
                tree.find_by_type(kind)
            } else if let Some(path) = &target.path {
                let path: BlockPath = path.parse()?;
                tree.get_by_path(&path).into_iter().collect()
            } else {
                Vec::new()
            };
            if found.is_empty() {
                anyhow::bail!("no matching block");
            }
            writeln!(out, "{}", to_json(&found, &config)?)?;
        }
        Command::Css { file, id, breakpoint } => {
            let tree = read_tree(&file)?;
            let breakpoint = breakpoint.unwrap_or(config.default_breakpoint);
            let css = tree.css_for(&id, breakpoint)?;
            writeln!(out, "{}", to_json(&css, &config)?)?;
        }
        Command::Duplicate { file, id, output } => {
            let mut tree = read_tree(&file)?;
            let copy_id = tree.duplicate_block(&id)?.id.clone();
            write_tree(&tree, output.as_deref().unwrap_or(&file), &config)?;
            writeln!(out, "{}", copy_id)?;
        }
        Command::Delete { file, id, output } => {
            let mut tree = read_tree(&file)?;
            let removed = tree.delete_block(&id)?;
            write_tree(&tree, output.as_deref().unwrap_or(&file), &config)?;
            writeln!(out, "deleted {} ({} descendants)", removed.id, removed.descendant_count())?;
        }
        Command::Check { file } => {
            let tree = read_tree(&file)?;
            tree.validate_ids()?;
            writeln!(out, "ok: {} blocks, ids unique", tree.block_count())?;
        }
    }
    Ok(())
}

fn read_tree(path: &Path) -> Result<BlockTree> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let tree = BlockTree::from_json(&text).with_context(|| format!("parsing {}", path.display()))?;
    tracing::debug!("loaded {} blocks from {}", tree.block_count(), path.display());
    Ok(tree)
}

fn write_tree(tree: &BlockTree, path: &Path, config: &CliConfig) -> Result<()> {
    let text = to_json(tree, config)?;
    std::fs::write(path, text + "\n").with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("wrote {} blocks to {}", tree.block_count(), path.display());
    Ok(())
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, config: &CliConfig) -> Result<String> {
    let text = if config.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}
