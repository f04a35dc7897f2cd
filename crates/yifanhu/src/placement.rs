//! Random initial placement.

use rand::Rng;

use yifanhu_core::geometry::{Point, Scalar};

/// Samples `count` points uniformly from the half-open unit hypercube `[0, 1)^D`.
///
/// The random source is supplied by the caller, so a seeded generator gives
/// reproducible placements.
pub fn random_positions<T, R, const D: usize>(count: usize, rng: &mut R) -> Vec<Point<T, D>>
where
    T: Scalar,
    R: Rng,
{
    (0..count)
        .map(|_| Point::new(std::array::from_fn(|_| unit_sample(rng))))
        .collect()
}

/// Draws from `[0, 1)` at precision `T`.
///
/// Narrowing a draw close to one can round it up to exactly one, so such
/// values are pulled back below one.
fn unit_sample<T: Scalar, R: Rng>(rng: &mut R) -> T {
    let value = T::from_f64(rng.random::<f64>());
    if value < T::ONE {
        value
    } else {
        T::LARGEST_BELOW_ONE
    }
}
