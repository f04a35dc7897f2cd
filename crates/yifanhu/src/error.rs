//! Error types for layout construction.
//!
//! Every variant of [`LayoutError`] is detected while a
//! [`Layout`](crate::Layout) is being constructed, before any sweep runs.
//! A running layout never fails: coincident nodes are handled by the
//! distance floor and reaching the iteration budget is reported through
//! [`Status::Exhausted`](crate::Status::Exhausted).

use thiserror::Error;

/// The configuration errors that prevent a layout from being built.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("Adjacency must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Expected {expected} start positions, got {actual}")]
    PositionCount { expected: usize, actual: usize },

    #[error("Start position of node {node} has a non-finite coordinate")]
    NonFiniteStart { node: usize },

    #[error("Parameter `{name}` must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("Parameter `{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("Iteration budget must allow at least one sweep")]
    ZeroIterations,
}
