//! One full sweep over every node.
//!
//! A sweep moves each node by `step` along its normalized net force and
//! returns the system energy: the sum of squared net-force magnitudes.
//! How positions are read while they are being written depends on the
//! [`UpdateMode`].

use rayon::prelude::*;

use yifanhu_core::{
    adjacency::Adjacency,
    geometry::{Point, Scalar},
};

use crate::{
    force::net_force,
    options::{LayoutParameters, UpdateMode},
};

/// Runs one sweep in place and returns its energy.
pub fn sweep<A, T, const D: usize>(
    adjacency: &A,
    positions: &mut [Point<T, D>],
    step: T,
    params: &LayoutParameters<T>,
) -> T
where
    A: Adjacency + ?Sized,
    T: Scalar,
{
    match params.update_mode() {
        UpdateMode::Jacobi => jacobi_sweep(adjacency, positions, step, params),
        UpdateMode::GaussSeidel => gauss_seidel_sweep(adjacency, positions, step, params),
    }
}

/// Computes every net force from the unchanged positions, then moves all
/// nodes at once.
///
/// Forces are computed in parallel. Energy is summed in node order so the
/// result does not depend on thread scheduling.
fn jacobi_sweep<A, T, const D: usize>(
    adjacency: &A,
    positions: &mut [Point<T, D>],
    step: T,
    params: &LayoutParameters<T>,
) -> T
where
    A: Adjacency + ?Sized,
    T: Scalar,
{
    let snapshot: &[Point<T, D>] = positions;
    let forces: Vec<Point<T, D>> = (0..snapshot.len())
        .into_par_iter()
        .map(|i| net_force(adjacency, snapshot, i, params))
        .collect();

    let energy = forces
        .iter()
        .fold(T::ZERO, |energy, force| energy + force.norm_squared());

    positions
        .par_iter_mut()
        .zip(forces.par_iter())
        .for_each(|(position, &force)| *position = displace(*position, force, step));

    energy
}

/// Moves nodes one at a time in index order; node `i` sees the already moved
/// positions of nodes `0..i`.
fn gauss_seidel_sweep<A, T, const D: usize>(
    adjacency: &A,
    positions: &mut [Point<T, D>],
    step: T,
    params: &LayoutParameters<T>,
) -> T
where
    A: Adjacency + ?Sized,
    T: Scalar,
{
    let mut energy = T::ZERO;
    for i in 0..positions.len() {
        let force = net_force(adjacency, positions, i, params);
        energy += force.norm_squared();
        positions[i] = displace(positions[i], force, step);
    }
    energy
}

/// Moves `position` by `step` along the direction of `force`.
///
/// A zero force leaves the node in place, as does any move that would
/// produce a non-finite coordinate.
fn displace<T: Scalar, const D: usize>(
    position: Point<T, D>,
    force: Point<T, D>,
    step: T,
) -> Point<T, D> {
    let magnitude = force.norm();
    if magnitude == T::ZERO {
        return position;
    }

    let moved = position.add_point(force.scale(step / magnitude));
    if moved.is_finite() { moved } else { position }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use yifanhu_core::adjacency::{DenseAdjacency, SparseAdjacency};

    use super::*;
    use crate::options::LayoutOptions;

    fn params(mode: UpdateMode) -> LayoutParameters<f64> {
        LayoutParameters::from_options(&LayoutOptions::default().with_update_mode(mode)).unwrap()
    }

    #[test]
    fn test_displace_moves_by_step() {
        let moved = displace(Point::new([1.0, 1.0]), Point::new([30.0, 40.0]), 0.5);
        assert_approx_eq!(f64, moved.x(), 1.3);
        assert_approx_eq!(f64, moved.y(), 1.4);
    }

    #[test]
    fn test_displace_zero_force_keeps_position() {
        let p = Point::new([2.0, -1.0]);
        assert_eq!(displace(p, Point::origin(), 1.0), p);
    }

    #[test]
    fn test_displace_infinite_force_keeps_position() {
        let p = Point::new([2.0, -1.0]);
        assert_eq!(displace(p, Point::new([f64::INFINITY, 0.0]), 1.0), p);
    }

    #[test]
    fn test_jacobi_connected_pair_moves_symmetrically() {
        let adjacency = SparseAdjacency::from_edges(2, [(0, 1)]).unwrap();
        let mut positions = vec![Point::new([0.0, 0.0]), Point::new([4.0, 0.0])];

        let energy = sweep(&adjacency, &mut positions, 1.0, &params(UpdateMode::Jacobi));

        // Each node feels 16 units of attraction and moves one unit inward.
        assert_approx_eq!(f64, energy, 2.0 * 16.0 * 16.0);
        assert_approx_eq!(f64, positions[0].x(), 1.0);
        assert_approx_eq!(f64, positions[1].x(), 3.0);
    }

    #[test]
    fn test_gauss_seidel_sees_moved_neighbors() {
        let adjacency = SparseAdjacency::from_edges(2, [(0, 1)]).unwrap();
        let mut positions = vec![Point::new([0.0, 0.0]), Point::new([4.0, 0.0])];

        let energy = sweep(
            &adjacency,
            &mut positions,
            1.0,
            &params(UpdateMode::GaussSeidel),
        );

        // Node 1 is pulled toward node 0's new position at x = 1.
        assert_approx_eq!(f64, positions[0].x(), 1.0);
        assert_approx_eq!(f64, positions[1].x(), 3.0);
        assert_approx_eq!(f64, energy, 16.0 * 16.0 + 9.0 * 9.0);
    }

    #[test]
    fn test_unconnected_pair_moves_apart() {
        let adjacency = DenseAdjacency::empty(2);
        let mut positions = vec![Point::new([0.0, 0.0, 0.0]), Point::new([0.0, 0.0, 1.0])];

        let energy = sweep(&adjacency, &mut positions, 0.5, &params(UpdateMode::Jacobi));

        assert!(energy > 0.0);
        assert_approx_eq!(f64, positions[0].distance(positions[1]), 2.0);
    }

    #[test]
    fn test_empty_graph_has_zero_energy() {
        let adjacency = SparseAdjacency::new(0);
        let mut positions: Vec<Point<f64, 2>> = Vec::new();
        assert_eq!(
            sweep(&adjacency, &mut positions, 1.0, &params(UpdateMode::Jacobi)),
            0.0
        );
    }
}
