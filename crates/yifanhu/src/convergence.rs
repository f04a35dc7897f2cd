//! Termination test.
//!
//! A run is [`Status::Running`] until either the sweep budget is spent
//! ([`Status::Exhausted`]) or no node moved by `K * tol` or more during the
//! last sweep ([`Status::Converged`]). Both terminal states are final.

use yifanhu_core::geometry::{Point, Scalar};

/// Where a layout run stands.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// More sweeps are needed.
    #[default]
    Running,
    /// Every node moved less than the displacement threshold.
    Converged,
    /// The sweep budget ran out first. Not an error.
    Exhausted,
}

impl Status {
    /// Returns true for [`Status::Converged`] and [`Status::Exhausted`].
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl From<Status> for &'static str {
    fn from(val: Status) -> Self {
        match val {
            Status::Running => "running",
            Status::Converged => "converged",
            Status::Exhausted => "exhausted",
        }
    }
}

/// Evaluates the status after `iteration` completed sweeps.
///
/// Iteration zero is always [`Status::Running`]: no sweep has executed yet,
/// so the position snapshots carry no information. The budget is checked
/// before stability, so a run that settles on its last allowed sweep reports
/// [`Status::Exhausted`].
pub fn evaluate<T: Scalar, const D: usize>(
    iteration: usize,
    max_iterations: usize,
    previous: &[Point<T, D>],
    current: &[Point<T, D>],
    threshold: T,
) -> Status {
    if iteration == 0 {
        Status::Running
    } else if iteration >= max_iterations {
        Status::Exhausted
    } else if is_stable(previous, current, threshold) {
        Status::Converged
    } else {
        Status::Running
    }
}

/// Returns true if every node moved strictly less than `threshold`.
pub fn is_stable<T: Scalar, const D: usize>(
    previous: &[Point<T, D>],
    current: &[Point<T, D>],
    threshold: T,
) -> bool {
    previous
        .iter()
        .zip(current)
        .all(|(&before, &after)| before.distance(after) < threshold)
}
