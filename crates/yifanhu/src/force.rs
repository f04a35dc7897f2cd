//! Pairwise force law.
//!
//! Each ordered pair of distinct nodes `(i, j)` contributes exactly one force
//! to node `i`, chosen by adjacency:
//!
//! - adjacent: attraction `d² / K`
//! - not adjacent: repulsion `-C·K² / d`
//!
//! The contribution points from `i` toward `j`, so a positive magnitude pulls
//! `i` toward `j` and a negative one pushes it away.
//!
//! Note that adjacent pairs receive no repulsion. The general spring-electric
//! model sums repulsion over every pair and attraction over edges on top of
//! it; this engine applies one law per pair instead.

use log::trace;

use yifanhu_core::{
    adjacency::Adjacency,
    geometry::{Point, Scalar},
};

use crate::options::LayoutParameters;

/// Attractive force magnitude between two adjacent nodes at `distance`.
pub fn attraction<T: Scalar>(distance: T, k: T) -> T {
    distance * distance / k
}

/// Repulsive force magnitude between two non-adjacent nodes at `distance`.
///
/// Always non-positive for non-negative `c`.
pub fn repulsion<T: Scalar>(distance: T, c: T, k: T) -> T {
    -(c * k * k) / distance
}

/// Force exerted on a node at `from` by a node at `to`.
///
/// Distances below the `min_distance` floor of `params` are clamped to it
/// before both the magnitude and the direction are computed, so coincident
/// points contribute the zero vector instead of NaN.
pub fn pair_force<T: Scalar, const D: usize>(
    from: Point<T, D>,
    to: Point<T, D>,
    adjacent: bool,
    params: &LayoutParameters<T>,
) -> Point<T, D> {
    let delta = to.sub_point(from);
    let raw_distance = delta.norm();
    let distance = raw_distance.max(params.min_distance());
    if raw_distance < params.min_distance() {
        trace!(
            distance:? = raw_distance,
            floor:? = params.min_distance();
            "Clamping pairwise distance to floor"
        );
    }

    let magnitude = if adjacent {
        attraction(distance, params.k())
    } else {
        repulsion(distance, params.c(), params.k())
    };

    delta.scale(magnitude / distance)
}

/// Net force on node `i` from every other node in `positions`.
pub fn net_force<A, T, const D: usize>(
    adjacency: &A,
    positions: &[Point<T, D>],
    i: usize,
    params: &LayoutParameters<T>,
) -> Point<T, D>
where
    A: Adjacency + ?Sized,
    T: Scalar,
{
    let from = positions[i];
    positions
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != i)
        .fold(Point::origin(), |total, (j, &to)| {
            total.add_point(pair_force(from, to, adjacency.is_adjacent(i, j), params))
        })
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use yifanhu_core::adjacency::SparseAdjacency;

    use super::*;
    use crate::options::LayoutOptions;

    fn params() -> LayoutParameters<f64> {
        LayoutParameters::from_options(&LayoutOptions::default()).unwrap()
    }

    #[test]
    fn test_magnitudes() {
        assert_approx_eq!(f64, attraction(2.0, 1.0), 4.0);
        assert_approx_eq!(f64, attraction(2.0, 4.0), 1.0);
        assert_approx_eq!(f64, repulsion(2.0, 0.2, 1.0), -0.1);
        assert_approx_eq!(f64, repulsion(0.5, 0.2, 2.0), -1.6);
    }

    #[test]
    fn test_attraction_pulls_toward_neighbor() {
        let f = pair_force(
            Point::new([0.0, 0.0]),
            Point::new([3.0, 0.0]),
            true,
            &params(),
        );
        assert_approx_eq!(f64, f.x(), 9.0);
        assert_approx_eq!(f64, f.y(), 0.0);
    }

    #[test]
    fn test_repulsion_pushes_away() {
        let f = pair_force(
            Point::new([0.0, 0.0]),
            Point::new([0.0, 2.0]),
            false,
            &params(),
        );
        assert_approx_eq!(f64, f.x(), 0.0);
        assert_approx_eq!(f64, f.y(), -0.1);
    }

    #[test]
    fn test_coincident_points_yield_zero_force() {
        let p = Point::new([1.0, 1.0, 1.0]);
        let attract = pair_force(p, p, true, &params());
        let repel = pair_force(p, p, false, &params());
        assert!(attract.is_zero());
        assert!(repel.is_zero());
        assert!(repel.is_finite());
    }

    #[test]
    fn test_nearly_coincident_points_stay_finite() {
        let f = pair_force(
            Point::new([0.0_f32, 0.0]),
            Point::new([1e-30_f32, 0.0]),
            false,
            &LayoutParameters::from_options(&LayoutOptions::default()).unwrap(),
        );
        assert!(f.is_finite());
    }

    #[test]
    fn test_net_force_selects_one_law_per_pair() {
        // 0 - 1 connected, 2 unconnected to both.
        let adjacency = SparseAdjacency::from_edges(3, [(0, 1)]).unwrap();
        let positions = [
            Point::new([0.0, 0.0]),
            Point::new([2.0, 0.0]),
            Point::new([0.0, 2.0]),
        ];

        let f = net_force(&adjacency, &positions, 0, &params());

        // Attraction toward node 1 only, repulsion from node 2 only.
        assert_approx_eq!(f64, f.x(), 4.0);
        assert_approx_eq!(f64, f.y(), -0.1);
    }

    #[test]
    fn test_net_force_on_isolated_single_node() {
        let adjacency = SparseAdjacency::new(1);
        let positions = [Point::new([0.3, 0.7])];
        assert!(net_force(&adjacency, &positions, 0, &params()).is_zero());
    }
}
