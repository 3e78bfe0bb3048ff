//! Snapshot reference graph CLI.
//!
//! Provides the `snapgraph` binary for inspecting configuration snapshots:
//! listing them, viewing one snapshot's reference graph or a single node,
//! diffing two snapshots and exporting authored content to CSV.
//!
//! Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over
//! `-v` when set.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::Settings;

/// Configuration snapshot graph tools.
#[derive(Parser)]
#[command(name = "snapgraph", about = "Configuration snapshot reference graph tools")]
struct Cli {
    /// Directory holding one sub-directory per snapshot.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List snapshots with document counts and fingerprints.
    List,

    /// Show a snapshot's reference graph.
    Graph {
        snapshot: String,

        /// Keep only nodes of this class (repeatable).
        #[arg(long = "class")]
        classes: Vec<String>,

        /// Keep only nodes of this program (repeatable).
        #[arg(long = "program")]
        programs: Vec<String>,

        /// Drop secondary nodes.
        #[arg(long)]
        primary_only: bool,

        /// Print the node/edge export as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one node's detail view.
    Node {
        snapshot: String,

        /// Full reference key of the node.
        name: String,
    },

    /// Compare two snapshots.
    Diff {
        a: String,
        b: String,

        /// Canonicalization depth limit.
        #[arg(long)]
        max_depth: Option<usize>,

        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Export authored content to CSV.
    Export {
        snapshot: String,

        /// messages, incentives, custom-fields, page-layouts or all.
        kind: String,

        /// Output directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            process::exit(1);
        }
    };
    if let Some(root) = cli.root {
        settings.root = root;
    }
    tracing::debug!(root = %settings.root.display(), max_depth = settings.max_depth, "resolved settings");

    let exit_code = match cli.command {
        Commands::List => commands::run_list(&settings),
        Commands::Graph {
            snapshot,
            classes,
            programs,
            primary_only,
            json,
        } => commands::run_graph(&settings, &snapshot, &classes, &programs, primary_only, json),
        Commands::Node { snapshot, name } => commands::run_node(&settings, &snapshot, &name),
        Commands::Diff {
            a,
            b,
            max_depth,
            json,
        } => {
            if let Some(depth) = max_depth {
                settings.max_depth = depth;
            }
            commands::run_diff(&settings, &a, &b, json)
        }
        Commands::Export {
            snapshot,
            kind,
            out,
        } => {
            if let Some(out) = out {
                settings.content_dir = out;
            }
            commands::run_export(&settings, &snapshot, &kind)
        }
    };
    process::exit(exit_code);
}
