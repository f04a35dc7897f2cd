//! CLI logic for the yifanhu layout tool.
//!
//! This module reads an edge list, lays the graph out with the
//! [`yifanhu`] engine and writes the node positions as CSV.

pub mod config;
pub mod error;
pub mod error_adapter;
pub mod input;
pub mod output;

mod args;

pub use args::Args;
pub use error::CliError;

use log::info;

use yifanhu::{Layout, adjacency::SparseAdjacency};

use crate::config::{AppConfig, ConfigError};

/// Run the yifanhu CLI application
///
/// This function loads the configuration, applies command-line overrides,
/// lays out the input graph and writes the positions to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed edge lists
/// - Invalid layout options
/// - Output errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing edge list"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(seed) = args.seed {
        app_config = app_config.with_seed(seed);
    }
    if let Some(dimensions) = args.dimensions {
        app_config = app_config.with_dimensions(dimensions);
    }

    let graph = input::read_edge_list_file(&args.input)?;
    info!(
        node_count = graph.node_count(),
        edge_count = graph.edge_count();
        "Edge list loaded"
    );

    match app_config.output().dimensions() {
        2 => lay_out::<2>(&graph, &app_config, &args.output),
        3 => lay_out::<3>(&graph, &app_config, &args.output),
        other => Err(ConfigError::Validation(format!(
            "dimensions must be 2 or 3, got {other}"
        ))
        .into()),
    }
}

fn lay_out<const D: usize>(
    graph: &SparseAdjacency,
    app_config: &AppConfig,
    output_path: &str,
) -> Result<(), CliError> {
    let layout = Layout::<_, f64, D>::new(graph, app_config.layout())?;
    let embedding = layout.run();

    info!(
        status:? = embedding.status(),
        iterations = embedding.iterations();
        "Layout computed"
    );

    output::write_positions_file(
        output_path,
        embedding.positions(),
        app_config.output().precision(),
    )?;

    info!(output_file = output_path; "Positions exported successfully");

    Ok(())
}
