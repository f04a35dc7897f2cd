//! Yifan Hu Core Types
//!
//! This crate provides the primitives shared by the yifanhu layout engine and
//! its front ends. It includes:
//!
//! - **Geometry**: Coordinate points generic over dimension and precision ([`geometry`] module)
//! - **Adjacency**: Read-only graph relations consumed by the engine ([`adjacency`] module)

pub mod adjacency;
pub mod geometry;
