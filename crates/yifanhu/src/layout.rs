//! The layout engine.
//!
//! A [`Layout`] binds an adjacency relation, validated parameters and start
//! positions. It can be run to completion with [`Layout::run`] or driven one
//! sweep at a time:
//!
//! ```
//! # use yifanhu::{Layout, LayoutOptions, adjacency::SparseAdjacency};
//! let graph = SparseAdjacency::from_edges(3, [(0, 1), (1, 2)]).unwrap();
//! let options = LayoutOptions::default().with_seed(7);
//! let layout = Layout::<_, f64, 2>::new(&graph, &options).unwrap();
//!
//! let mut state = layout.begin();
//! while !state.is_finished() {
//!     state = layout.advance(state);
//!     // state.positions() can be drawn here
//! }
//! assert_eq!(state.positions().len(), 3);
//! ```

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use yifanhu_core::{
    adjacency::Adjacency,
    geometry::{Point, Scalar},
};

use crate::{
    convergence::{self, Status},
    error::LayoutError,
    options::{LayoutOptions, LayoutParameters},
    placement::random_positions,
    step_control::StepController,
    sweep::sweep,
};

/// A configured layout run over a borrowed adjacency relation.
///
/// `T` is the scalar precision and `D` the number of dimensions. A layout is
/// immutable; all per-run state lives in [`IterationState`].
#[derive(Debug)]
pub struct Layout<'a, A: ?Sized, T, const D: usize> {
    adjacency: &'a A,
    params: LayoutParameters<T>,
    start_positions: Vec<Point<T, D>>,
}

impl<'a, A, T, const D: usize> Layout<'a, A, T, D>
where
    A: Adjacency + ?Sized,
    T: Scalar,
{
    /// Creates a layout with random start positions.
    ///
    /// Positions are drawn from a [`ChaCha8Rng`] seeded with
    /// [`LayoutOptions::seed`]. When no seed is set they come from the
    /// OS-seeded thread-local generator, so unseeded layouts differ from run
    /// to run. Use [`with_rng`](Self::with_rng) to supply the random source
    /// directly.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] if the adjacency is not square or the options
    /// are invalid.
    pub fn new(adjacency: &'a A, options: &LayoutOptions) -> Result<Self, LayoutError> {
        match options.seed() {
            Some(seed) => Self::with_rng(adjacency, options, &mut ChaCha8Rng::seed_from_u64(seed)),
            None => Self::with_rng(adjacency, options, &mut rand::rng()),
        }
    }

    /// Creates a layout with start positions drawn from `rng`.
    ///
    /// [`LayoutOptions::seed`] is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] if the adjacency is not square or the options
    /// are invalid.
    pub fn with_rng<R: Rng>(
        adjacency: &'a A,
        options: &LayoutOptions,
        rng: &mut R,
    ) -> Result<Self, LayoutError> {
        let node_count = square_size(adjacency)?;
        let params = LayoutParameters::from_options(options)?;
        Ok(Self {
            adjacency,
            params,
            start_positions: random_positions(node_count, rng),
        })
    }

    /// Creates a layout starting from explicit positions.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] if the adjacency is not square, the options are
    /// invalid, the number of positions differs from the number of nodes, or
    /// a position has a non-finite coordinate.
    pub fn with_start_positions(
        adjacency: &'a A,
        options: &LayoutOptions,
        positions: Vec<Point<T, D>>,
    ) -> Result<Self, LayoutError> {
        let node_count = square_size(adjacency)?;
        let params = LayoutParameters::from_options(options)?;

        if positions.len() != node_count {
            return Err(LayoutError::PositionCount {
                expected: node_count,
                actual: positions.len(),
            });
        }
        if let Some(node) = positions.iter().position(|p| !p.is_finite()) {
            return Err(LayoutError::NonFiniteStart { node });
        }

        Ok(Self {
            adjacency,
            params,
            start_positions: positions,
        })
    }

    /// Number of nodes being laid out
    pub fn node_count(&self) -> usize {
        self.start_positions.len()
    }

    /// The validated parameters
    pub fn parameters(&self) -> &LayoutParameters<T> {
        &self.params
    }

    /// The positions every run starts from
    pub fn start_positions(&self) -> &[Point<T, D>] {
        &self.start_positions
    }

    /// Starts a new run.
    ///
    /// The returned state is [`Status::Running`] with a step of one, infinite
    /// energy and no completed sweeps.
    pub fn begin(&self) -> IterationState<T, D> {
        IterationState {
            positions: self.start_positions.clone(),
            previous: self.start_positions.clone(),
            controller: StepController::new(),
            energy: T::INFINITY,
            iteration: 0,
            status: Status::Running,
        }
    }

    /// Performs one sweep and returns the updated state.
    ///
    /// A state that is already finished is returned unchanged. `state` must
    /// come from [`begin`](Self::begin) on this layout.
    pub fn advance(&self, mut state: IterationState<T, D>) -> IterationState<T, D> {
        if state.is_finished() {
            return state;
        }

        state.previous.clone_from(&state.positions);
        let previous_energy = state.energy;
        state.energy = sweep(
            self.adjacency,
            &mut state.positions,
            state.controller.step(),
            &self.params,
        );
        state.controller.update(state.energy, previous_energy);
        state.iteration += 1;
        state.status = self.evaluate(&state);

        debug!(
            iteration = state.iteration,
            energy:? = state.energy,
            step:? = state.controller.step(),
            status:? = state.status;
            "Sweep completed"
        );

        state
    }

    /// Runs the convergence check against `state` without modifying it.
    ///
    /// Evaluating the same state again always gives the same answer.
    pub fn evaluate(&self, state: &IterationState<T, D>) -> Status {
        convergence::evaluate(
            state.iteration,
            self.params.max_iterations(),
            &state.previous,
            &state.positions,
            self.params.displacement_threshold(),
        )
    }

    /// Runs sweeps until the layout converges or exhausts its budget.
    pub fn run(&self) -> Embedding<T, D> {
        info!(
            node_count = self.node_count(),
            dimensions = D,
            update_mode:? = self.params.update_mode(),
            max_iterations = self.params.max_iterations();
            "Starting layout"
        );

        let mut state = self.begin();
        while !state.is_finished() {
            state = self.advance(state);
        }

        info!(
            status:? = state.status,
            iterations = state.iteration,
            energy:? = state.energy;
            "Layout finished"
        );

        state.into()
    }
}

fn square_size<A: Adjacency + ?Sized>(adjacency: &A) -> Result<usize, LayoutError> {
    if adjacency.is_square() {
        Ok(adjacency.rows())
    } else {
        Err(LayoutError::NotSquare {
            rows: adjacency.rows(),
            cols: adjacency.cols(),
        })
    }
}

/// The state of a run between two sweeps.
///
/// Created by [`Layout::begin`] and threaded through [`Layout::advance`].
#[derive(Debug, Clone, PartialEq)]
pub struct IterationState<T, const D: usize> {
    positions: Vec<Point<T, D>>,
    previous: Vec<Point<T, D>>,
    controller: StepController<T>,
    energy: T,
    iteration: usize,
    status: Status,
}

impl<T: Scalar, const D: usize> IterationState<T, D> {
    /// Current node positions
    pub fn positions(&self) -> &[Point<T, D>] {
        &self.positions
    }

    /// Node positions before the last sweep
    pub fn previous_positions(&self) -> &[Point<T, D>] {
        &self.previous
    }

    /// Step size the next sweep will use
    pub fn step(&self) -> T {
        self.controller.step()
    }

    /// Consecutive improving sweeps since the step last changed
    pub fn progress(&self) -> u32 {
        self.controller.progress()
    }

    /// Energy of the last sweep, infinite before the first one
    pub fn energy(&self) -> T {
        self.energy
    }

    /// Number of completed sweeps
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns true once the run has converged or exhausted its budget
    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    /// Consumes the state, returning the current positions
    pub fn into_positions(self) -> Vec<Point<T, D>> {
        self.positions
    }
}

/// The outcome of [`Layout::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding<T, const D: usize> {
    positions: Vec<Point<T, D>>,
    status: Status,
    iterations: usize,
    energy: T,
}

impl<T: Scalar, const D: usize> Embedding<T, D> {
    /// Final node positions, indexed like the adjacency
    pub fn positions(&self) -> &[Point<T, D>] {
        &self.positions
    }

    /// How the run terminated: [`Status::Converged`] or [`Status::Exhausted`]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of sweeps performed
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Energy of the final sweep
    pub fn energy(&self) -> T {
        self.energy
    }

    /// Consumes the embedding, returning the final positions
    pub fn into_positions(self) -> Vec<Point<T, D>> {
        self.positions
    }
}

impl<T: Scalar, const D: usize> From<IterationState<T, D>> for Embedding<T, D> {
    fn from(state: IterationState<T, D>) -> Self {
        Self {
            positions: state.positions,
            status: state.status,
            iterations: state.iteration,
            energy: state.energy,
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use yifanhu_core::adjacency::SparseAdjacency;

    use super::*;
    use crate::options::UpdateMode;

    // ===================
    // Strategies
    // ===================

    /// A node count and a list of edges between nodes below it.
    fn graph_strategy() -> impl Strategy<Value = SparseAdjacency> {
        (1usize..10).prop_flat_map(|n| {
            prop::collection::vec((0..n, 0..n), 0..20).prop_map(move |edges| {
                let edges = edges.into_iter().filter(|(a, b)| a != b);
                SparseAdjacency::from_edges(n, edges).unwrap()
            })
        })
    }

    fn mode_strategy() -> impl Strategy<Value = UpdateMode> {
        prop_oneof![Just(UpdateMode::Jacobi), Just(UpdateMode::GaussSeidel)]
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Every sweep leaves finite positions, non-negative energy and a
    /// positive step.
    fn check_sweeps_stay_well_formed(
        graph: &SparseAdjacency,
        mode: UpdateMode,
        seed: u64,
    ) -> Result<(), TestCaseError> {
        let options = LayoutOptions::default()
            .with_update_mode(mode)
            .with_iterations(40)
            .with_seed(seed);
        let layout = Layout::<_, f64, 2>::new(graph, &options).unwrap();

        let mut state = layout.begin();
        while !state.is_finished() {
            state = layout.advance(state);
            prop_assert!(state.positions().iter().all(|p| p.is_finite()));
            prop_assert!(state.energy() >= 0.0);
            prop_assert!(state.step() > 0.0);
            prop_assert!(state.iteration() <= 40);
        }
        Ok(())
    }

    /// Nodes that all start on the same point feel no force and stay put.
    fn check_coincident_start_is_stationary(
        graph: &SparseAdjacency,
        mode: UpdateMode,
    ) -> Result<(), TestCaseError> {
        let start = vec![Point::new([0.5_f64, -0.5, 2.0]); graph.node_count()];
        let options = LayoutOptions::default().with_update_mode(mode);
        let layout = Layout::with_start_positions(graph, &options, start.clone()).unwrap();

        let embedding = layout.run();

        prop_assert_eq!(embedding.positions(), start.as_slice());
        prop_assert_eq!(embedding.energy(), 0.0);
        prop_assert_eq!(embedding.status(), Status::Converged);
        prop_assert_eq!(embedding.iterations(), 1);
        Ok(())
    }

    /// A seeded layout is reproducible.
    fn check_seeded_runs_match(graph: &SparseAdjacency, seed: u64) -> Result<(), TestCaseError> {
        let options = LayoutOptions::default().with_iterations(20).with_seed(seed);
        let first = Layout::<_, f32, 3>::new(graph, &options).unwrap().run();
        let second = Layout::<_, f32, 3>::new(graph, &options).unwrap().run();
        prop_assert_eq!(first, second);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn sweeps_stay_well_formed(graph in graph_strategy(), mode in mode_strategy(), seed in any::<u64>()) {
            check_sweeps_stay_well_formed(&graph, mode, seed)?;
        }

        #[test]
        fn coincident_start_is_stationary(graph in graph_strategy(), mode in mode_strategy()) {
            check_coincident_start_is_stationary(&graph, mode)?;
        }

        #[test]
        fn seeded_runs_match(graph in graph_strategy(), seed in any::<u64>()) {
            check_seeded_runs_match(&graph, seed)?;
        }
    }
}
