//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - run: publish events until interrupted (the default)
//! - presets: list available presets
//! - show: print the first event a preset would publish

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// orderpub - publishes demo order events to a local sidecar
#[derive(Parser, Debug)]
#[command(name = "orderpub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Publish events on a fixed interval
    Run(RunArgs),

    /// List available presets
    Presets,

    /// Print the first event a preset would publish
    Show {
        /// Preset name (defaults to publisher.preset from config)
        #[arg(short, long)]
        preset: Option<String>,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Preset name (defaults to publisher.preset from config)
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Sidecar publish URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Seconds to sleep between sends
    #[arg(short, long)]
    pub interval_secs: Option<u64>,

    /// Stop after this many sends instead of running forever
    #[arg(short = 'n', long)]
    pub count: Option<u64>,
}
