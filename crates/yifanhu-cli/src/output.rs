//! Position output.
//!
//! Positions are written as CSV with a `node,x,y` header (`node,x,y,z` in
//! three dimensions) and one row per node in index order.

use std::{io, iter, path::Path};

use csv::{Writer, WriterBuilder};

use yifanhu::geometry::Point;

use crate::error::CliError;

const AXES: [&str; 3] = ["x", "y", "z"];

/// Writes `positions` to the file at `path`, creating or truncating it.
///
/// # Errors
///
/// Returns [`CliError::Output`] if the file cannot be created or written.
pub fn write_positions_file<const D: usize>(
    path: impl AsRef<Path>,
    positions: &[Point<f64, D>],
    precision: usize,
) -> Result<(), CliError> {
    let writer = WriterBuilder::new().from_path(path)?;
    write_records(writer, positions, precision)
}

/// Writes `positions` to any writer.
///
/// Coordinates are printed with `precision` decimal places.
///
/// # Errors
///
/// Returns [`CliError::Output`] if writing fails.
pub fn write_positions<W: io::Write, const D: usize>(
    writer: W,
    positions: &[Point<f64, D>],
    precision: usize,
) -> Result<(), CliError> {
    write_records(WriterBuilder::new().from_writer(writer), positions, precision)
}

fn write_records<W: io::Write, const D: usize>(
    mut writer: Writer<W>,
    positions: &[Point<f64, D>],
    precision: usize,
) -> Result<(), CliError> {
    let header = iter::once("node").chain(AXES.iter().copied().take(D));
    writer.write_record(header)?;

    for (node, position) in positions.iter().enumerate() {
        let coords = position
            .coords()
            .iter()
            .map(|c| format!("{c:.precision$}"));
        writer.write_record(iter::once(node.to_string()).chain(coords))?;
    }

    writer.flush()?;
    Ok(())
}
