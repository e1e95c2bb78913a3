//! dirtreewalk - list a directory tree with entry kinds and fingerprints.
//!
//! Usage:
//!   dirtreewalk <PATH>...            List the first path
//!   dirtreewalk --all <PATH>...      List every path in turn
//!   dirtreewalk --format json <PATH> One JSON object per entry
//!   dirtreewalk --help               Show help
//!
//! Each line holds the entry kind, its name, its path relative to the
//! working directory and, for files, the MD5 of the file *name*. The
//! fingerprint does not cover file contents; that is the historical format
//! and it is kept.

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use dirtreewalk_core::{SymlinkPolicy, WalkConfig, WalkSummary};
use dirtreewalk_scan::{EntrySink, JsonLinesSink, TextSink, TreeWalker};

#[derive(Parser)]
#[command(
    name = "dirtreewalk",
    version,
    about = "List all files and subdirectories of a directory",
    long_about = "dirtreewalk lists every directory, file and symbolic link below a path.\n\n\
                  Files carry the MD5 sum of their name. Only the first PATH is listed \
                  unless --all is given."
)]
struct Cli {
    /// Directories to list
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// List every PATH instead of only the first
    #[arg(short, long)]
    all: bool,

    /// Do not list directories deeper than this
    #[arg(short = 'd', long, value_name = "N")]
    max_depth: Option<u32>,

    /// Classify symbolic links before following them (links are never descended)
    #[arg(long)]
    link_first: bool,

    /// Descend into directories that loop back to an ancestor
    #[arg(long)]
    no_cycle_check: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Print walk statistics to stderr when done
    #[arg(short, long)]
    summary: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let targets = if cli.all {
        cli.paths.as_slice()
    } else {
        if cli.paths.len() > 1 {
            warn!(
                ignored = cli.paths.len() - 1,
                "only the first path is listed, pass --all to list every path"
            );
        }
        cli.paths.get(..1).unwrap_or_default()
    };

    let stdout = io::stdout();
    let mut sink: Box<dyn EntrySink> = match cli.format {
        OutputFormat::Text => Box::new(TextSink::new(stdout.lock())),
        OutputFormat::Json => Box::new(JsonLinesSink::new(stdout.lock())),
    };

    let walker = TreeWalker::new();
    for path in targets {
        let config = walk_config(&cli, path.clone());
        let summary = walker
            .walk(&config, sink.as_mut())
            .wrap_err_with(|| format!("Listing {} failed", path.display()))?;

        if cli.summary {
            print_summary(&summary);
        }
    }

    Ok(())
}

/// Build the walk configuration for one path.
///
/// An empty path is passed through so the walker reports it as invalid.
fn walk_config(cli: &Cli, root: PathBuf) -> WalkConfig {
    let mut config = WalkConfig::new(root);
    config.max_depth = cli.max_depth;
    config.detect_cycles = !cli.no_cycle_check;
    config.symlink_policy = if cli.link_first {
        SymlinkPolicy::LinkFirst
    } else {
        SymlinkPolicy::FollowFirst
    };
    config
}

/// Install the stderr log subscriber. `RUST_LOG` overrides `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Print walk statistics to stderr.
fn print_summary(summary: &WalkSummary) {
    let stats = &summary.stats;
    eprintln!();
    eprintln!("{}", "─".repeat(60));
    eprintln!(" {}", summary.root.display());
    eprintln!(
        " {} directories, {} files, {} links",
        stats.directories, stats.files, stats.symlinks
    );
    if stats.skipped > 0 {
        eprintln!(" {} entries of other kinds skipped", stats.skipped);
    }
    eprintln!(
        " {} directories listed, max depth {}",
        stats.listed, stats.max_depth
    );
    eprintln!(" Walked in {:.2}s", summary.duration.as_secs_f64());
    eprintln!("{}", "─".repeat(60));

    if summary.has_warnings() {
        eprintln!("{} warning(s) during walk", summary.warnings.len());
    }
}
