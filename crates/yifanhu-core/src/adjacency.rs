//! Adjacency relations over node indices.
//!
//! The layout engine only ever asks one question of a graph: are nodes `i`
//! and `j` adjacent? This module provides the [`Adjacency`] trait capturing
//! that question plus two implementations:
//!
//! - [`DenseAdjacency`] - a row-major boolean matrix, possibly non-square
//! - [`SparseAdjacency`] - a set of index pairs over `n` nodes
//!
//! A [`SparseAdjacency`] can also be built from any [`petgraph::Graph`].

use std::collections::HashSet;

use petgraph::{EdgeType, graph::IndexType, visit::EdgeRef};
use thiserror::Error;

/// Errors raised while building an adjacency relation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdjacencyError {
    #[error("Row {row} has {len} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("Matrix data has {actual} entries, expected {rows}x{cols}")]
    DataLength {
        rows: usize,
        cols: usize,
        actual: usize,
    },

    #[error("Edge ({from}, {to}) references a node outside 0..{node_count}")]
    NodeOutOfRange {
        from: usize,
        to: usize,
        node_count: usize,
    },
}

/// A read-only adjacency relation over node indices.
///
/// Entry `(i, j)` is `true` iff an edge connects `i` and `j`. The relation
/// may be asymmetric; the layout engine reads entry `(i, j)` when computing
/// the force that `j` exerts on `i`.
///
/// Implementations must be [`Sync`] so the engine can share them across
/// worker threads during a sweep.
pub trait Adjacency: Sync {
    /// Number of rows of the relation
    fn rows(&self) -> usize;

    /// Number of columns of the relation
    fn cols(&self) -> usize;

    /// Returns true if `i` and `j` are adjacent
    ///
    /// Callers only pass indices below [`rows`](Self::rows) and
    /// [`cols`](Self::cols) respectively.
    fn is_adjacent(&self, i: usize, j: usize) -> bool;

    /// Returns true if the relation has as many rows as columns
    fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }
}

/// A dense, row-major boolean adjacency matrix.
///
/// # Examples
///
/// ```
/// # use yifanhu_core::adjacency::{Adjacency, DenseAdjacency};
/// let path = DenseAdjacency::from_rows(vec![
///     vec![false, true, false],
///     vec![true, false, true],
///     vec![false, true, false],
/// ])
/// .unwrap();
///
/// assert!(path.is_square());
/// assert!(path.is_adjacent(0, 1));
/// assert!(!path.is_adjacent(0, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseAdjacency {
    rows: usize,
    cols: usize,
    entries: Vec<bool>,
}

impl DenseAdjacency {
    /// Creates a matrix from row-major `entries` of shape `rows x cols`.
    ///
    /// # Errors
    ///
    /// Returns [`AdjacencyError::DataLength`] if `entries.len() != rows * cols`
    /// or the product does not fit in `usize`.
    pub fn new(rows: usize, cols: usize, entries: Vec<bool>) -> Result<Self, AdjacencyError> {
        if rows.checked_mul(cols) != Some(entries.len()) {
            return Err(AdjacencyError::DataLength {
                rows,
                cols,
                actual: entries.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            entries,
        })
    }

    /// Creates a matrix from a list of rows.
    ///
    /// The column count is taken from the first row.
    ///
    /// # Errors
    ///
    /// Returns [`AdjacencyError::RaggedRow`] if any row differs in length
    /// from the first one.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, AdjacencyError> {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut entries = Vec::with_capacity(row_count * cols);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(AdjacencyError::RaggedRow {
                    row,
                    len: values.len(),
                    expected: cols,
                });
            }
            entries.extend(values);
        }

        Ok(Self {
            rows: row_count,
            cols,
            entries,
        })
    }

    /// Creates an `n x n` matrix with no edges.
    pub fn empty(n: usize) -> Self {
        Self {
            rows: n,
            cols: n,
            entries: vec![false; n * n],
        }
    }

    /// Sets entry `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` lies outside the matrix.
    pub fn set(&mut self, i: usize, j: usize, adjacent: bool) {
        assert!(
            i < self.rows && j < self.cols,
            "entry ({i}, {j}) outside {}x{} matrix",
            self.rows,
            self.cols
        );
        self.entries[i * self.cols + j] = adjacent;
    }
}

impl Adjacency for DenseAdjacency {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn is_adjacent(&self, i: usize, j: usize) -> bool {
        self.entries[i * self.cols + j]
    }
}

/// A sparse adjacency relation stored as a set of `(i, j)` pairs.
///
/// Always square: `rows() == cols() == node_count()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseAdjacency {
    node_count: usize,
    pairs: HashSet<(usize, usize)>,
}

impl SparseAdjacency {
    /// Creates a relation over `node_count` nodes with no edges.
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            pairs: HashSet::new(),
        }
    }

    /// Creates a symmetric relation from undirected edges.
    ///
    /// Each `(u, v)` sets both `(u, v)` and `(v, u)`.
    ///
    /// # Errors
    ///
    /// Returns [`AdjacencyError::NodeOutOfRange`] if an endpoint is not
    /// below `node_count`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use yifanhu_core::adjacency::{Adjacency, SparseAdjacency};
    /// let triangle = SparseAdjacency::from_edges(3, [(0, 1), (1, 2), (2, 0)]).unwrap();
    /// assert!(triangle.is_adjacent(1, 0));
    /// assert_eq!(triangle.edge_count(), 3);
    /// ```
    pub fn from_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, AdjacencyError> {
        let mut adjacency = Self::new(node_count);
        for (source, target) in edges {
            adjacency.insert_edge(source, target)?;
        }
        Ok(adjacency)
    }

    /// Adds an undirected edge between `source` and `target`.
    ///
    /// # Errors
    ///
    /// Returns [`AdjacencyError::NodeOutOfRange`] if an endpoint is not
    /// below the node count.
    pub fn insert_edge(&mut self, source: usize, target: usize) -> Result<(), AdjacencyError> {
        self.insert_arc(source, target)?;
        self.pairs.insert((target, source));
        Ok(())
    }

    /// Adds the single directed entry `(source, target)`.
    ///
    /// # Errors
    ///
    /// Returns [`AdjacencyError::NodeOutOfRange`] if an endpoint is not
    /// below the node count.
    pub fn insert_arc(&mut self, source: usize, target: usize) -> Result<(), AdjacencyError> {
        if source >= self.node_count || target >= self.node_count {
            return Err(AdjacencyError::NodeOutOfRange {
                from: source,
                to: target,
                node_count: self.node_count,
            });
        }
        self.pairs.insert((source, target));
        Ok(())
    }

    /// Number of nodes in the relation
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of distinct edges, counting a symmetric pair once
    pub fn edge_count(&self) -> usize {
        self.pairs
            .iter()
            .filter(|&&(i, j)| i <= j || !self.pairs.contains(&(j, i)))
            .count()
    }
}

impl Adjacency for SparseAdjacency {
    fn rows(&self) -> usize {
        self.node_count
    }

    fn cols(&self) -> usize {
        self.node_count
    }

    fn is_adjacent(&self, i: usize, j: usize) -> bool {
        self.pairs.contains(&(i, j))
    }
}

/// Builds the adjacency of a petgraph [`Graph`](petgraph::Graph).
///
/// Node indices map one-to-one onto layout indices. Undirected graphs yield a
/// symmetric relation; directed graphs only set the `(source, target)` entry
/// of each edge.
impl<N, E, Ty, Ix> From<&petgraph::Graph<N, E, Ty, Ix>> for SparseAdjacency
where
    Ty: EdgeType,
    Ix: IndexType,
{
    fn from(graph: &petgraph::Graph<N, E, Ty, Ix>) -> Self {
        let mut pairs = HashSet::with_capacity(graph.edge_count() * 2);
        for edge in graph.edge_references() {
            let (source, target) = (edge.source().index(), edge.target().index());
            pairs.insert((source, target));
            if !graph.is_directed() {
                pairs.insert((target, source));
            }
        }
        Self {
            node_count: graph.node_count(),
            pairs,
        }
    }
}
