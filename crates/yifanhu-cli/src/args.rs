//! Command-line argument definitions for the yifanhu CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, layout overrides, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the yifanhu layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input edge list (CSV)
    #[arg(help = "Path to the input edge list")]
    pub input: String,

    /// Path to the output positions file (CSV)
    #[arg(short, long, default_value = "layout.csv")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Number of dimensions to lay out in (2 or 3), overrides the config file
    #[arg(short, long)]
    pub dimensions: Option<usize>,

    /// Seed for the random start positions, overrides the config file
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
