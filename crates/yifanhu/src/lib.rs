//! # Yifan Hu force-directed layout
//!
//! This crate computes positions for the nodes of a graph by simulating a
//! spring-electric system: adjacent nodes attract, every other pair repels,
//! and the nodes are moved along their net force with an adaptive step until
//! the layout settles.
//!
//! The graph is supplied through the [`Adjacency`](adjacency::Adjacency)
//! trait; dense matrices, sparse edge sets and `petgraph` graphs are
//! supported out of the box. Coordinates are generic over the scalar
//! precision (`f32` or `f64`) and the number of dimensions.
//!
//! # Quick Start
//!
//! ```
//! use yifanhu::{Layout, LayoutOptions, Status, adjacency::SparseAdjacency};
//!
//! // A triangle with a tail
//! let graph = SparseAdjacency::from_edges(4, [(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
//!
//! let options = LayoutOptions::default().with_k(1.5).with_seed(42);
//! let layout = Layout::<_, f64, 2>::new(&graph, &options).unwrap();
//! let embedding = layout.run();
//!
//! assert_eq!(embedding.positions().len(), 4);
//! assert!(matches!(embedding.status(), Status::Converged | Status::Exhausted));
//! ```
//!
//! # Stepping
//!
//! [`Layout::begin`] and [`Layout::advance`] expose the same iteration one
//! sweep at a time, for callers that want to animate or inspect intermediate
//! layouts. See the [`layout`] module for an example.

pub mod convergence;
pub mod force;
pub mod layout;
pub mod options;
pub mod placement;
pub mod step_control;
pub mod sweep;

mod error;

pub use yifanhu_core::{adjacency, geometry};

pub use convergence::Status;
pub use error::LayoutError;
pub use layout::{Embedding, IterationState, Layout};
pub use options::{LayoutOptions, LayoutParameters, UpdateMode};
