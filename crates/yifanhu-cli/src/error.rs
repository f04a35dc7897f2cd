//! Error types for the CLI.
//!
//! [`CliError`] wraps everything that can stop a CLI run: reading files,
//! parsing the edge list, loading configuration, building the layout and
//! writing the result.

use std::io;

use thiserror::Error;

use yifanhu::{LayoutError, adjacency::AdjacencyError};

use crate::config::ConfigError;

/// The main error type for CLI runs.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid edge list at line {line}: {message}")]
    Input { line: u64, message: String },

    #[error("Invalid graph: {0}")]
    Graph(#[from] AdjacencyError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Failed to write positions: {0}")]
    Output(#[from] csv::Error),
}

impl CliError {
    /// Create a new `Input` error for the given line.
    pub fn new_input_error(line: u64, message: impl Into<String>) -> Self {
        Self::Input {
            line,
            message: message.into(),
        }
    }
}
