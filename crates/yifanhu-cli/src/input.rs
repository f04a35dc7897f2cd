//! Edge list input.
//!
//! The input is a headerless CSV file. Each record is either
//! `source,target`, declaring an undirected edge, or a single node id,
//! declaring a node that may have no edges. Node ids are non-negative
//! integers and the graph has `max id + 1` nodes. Lines starting with `#`
//! are comments.
//!
//! ```text
//! # a triangle and an isolated node
//! 0,1
//! 1,2
//! 2,0
//! 5
//! ```

use std::{fs::File, io, path::Path};

use csv::{ReaderBuilder, Trim};
use log::debug;

use yifanhu::adjacency::SparseAdjacency;

use crate::error::CliError;

/// Largest node count an edge list may declare.
///
/// Every sweep is quadratic in the node count, so ids beyond this are
/// rejected as input errors rather than allocated.
pub const MAX_NODE_COUNT: usize = 1 << 20;

/// Reads an edge list from the file at `path`.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the file cannot be opened and
/// [`CliError::Input`] if a record is malformed.
pub fn read_edge_list_file(path: impl AsRef<Path>) -> Result<SparseAdjacency, CliError> {
    let file = File::open(path)?;
    read_edge_list(file)
}

/// Reads an edge list from any reader.
///
/// # Errors
///
/// Returns [`CliError::Input`] if a record is not valid UTF-8, has more than
/// two fields, or contains something other than a node id below
/// [`MAX_NODE_COUNT`].
pub fn read_edge_list<R: io::Read>(reader: R) -> Result<SparseAdjacency, CliError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut edges = Vec::new();
    let mut node_count = 0;

    for result in reader.records() {
        let record = result.map_err(|err| {
            let line = err.position().map_or(0, csv::Position::line);
            CliError::new_input_error(line, err.to_string())
        })?;
        let line = record.position().map_or(0, csv::Position::line);

        match record.len() {
            1 => {
                let node = parse_node(&record[0], line)?;
                node_count = node_count.max(required_count(node, line)?);
            }
            2 => {
                let source = parse_node(&record[0], line)?;
                let target = parse_node(&record[1], line)?;
                node_count = node_count.max(required_count(source.max(target), line)?);
                edges.push((source, target));
            }
            len => {
                return Err(CliError::new_input_error(
                    line,
                    format!("expected 1 or 2 fields, found {len}"),
                ));
            }
        }
    }

    debug!(node_count = node_count, edge_records = edges.len(); "Read edge list");

    Ok(SparseAdjacency::from_edges(node_count, edges)?)
}

fn parse_node(field: &str, line: u64) -> Result<usize, CliError> {
    field
        .parse()
        .map_err(|_| CliError::new_input_error(line, format!("invalid node id `{field}`")))
}

/// Node count needed to hold `node`.
fn required_count(node: usize, line: u64) -> Result<usize, CliError> {
    node.checked_add(1)
        .filter(|&count| count <= MAX_NODE_COUNT)
        .ok_or_else(|| {
            CliError::new_input_error(
                line,
                format!(
                    "node id {node} too large, at most {MAX_NODE_COUNT} nodes are supported"
                ),
            )
        })
}
