//! Adaptive step size.
//!
//! After every sweep the controller compares the new energy with the previous
//! one. Five consecutive improvements grow the step by `1 / COOLDOWN`; any
//! sweep that fails to improve shrinks it by `COOLDOWN` and resets the count.

use yifanhu_core::geometry::Scalar;

/// Factor applied to the step on a setback (and inverted on sustained progress).
pub const COOLDOWN: f64 = 0.9;

/// Consecutive improvements needed before the step grows.
pub const PROGRESS_THRESHOLD: u32 = 5;

/// Step size and improvement counter carried between sweeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepController<T> {
    step: T,
    progress: u32,
}

impl<T: Scalar> Default for StepController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> StepController<T> {
    /// Starts with a step of one and no progress.
    pub fn new() -> Self {
        Self {
            step: T::ONE,
            progress: 0,
        }
    }

    /// Current step size. Always strictly positive.
    pub fn step(&self) -> T {
        self.step
    }

    /// Number of consecutive improving sweeps since the last adjustment.
    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// Adapts the step to the energy of the sweep that just finished.
    pub fn update(&mut self, energy: T, previous_energy: T) {
        let cooldown = T::from_f64(COOLDOWN);
        if energy < previous_energy {
            self.progress += 1;
            if self.progress >= PROGRESS_THRESHOLD {
                self.progress = 0;
                self.step = self.step / cooldown;
            }
        } else {
            self.progress = 0;
            self.step = (self.step * cooldown).max(T::MIN_POSITIVE);
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_initial_state() {
        let controller = StepController::<f64>::new();
        assert_eq!(controller.step(), 1.0);
        assert_eq!(controller.progress(), 0);
    }

    #[test]
    fn test_improvement_below_threshold_keeps_step() {
        let mut controller = StepController::<f64>::new();
        for energy in [10.0, 9.0, 8.0, 7.0] {
            controller.update(energy, energy + 1.0);
        }
        assert_eq!(controller.progress(), 4);
        assert_eq!(controller.step(), 1.0);
    }

    #[test]
    fn test_fifth_improvement_grows_step() {
        let mut controller = StepController::<f64>::new();
        for _ in 0..5 {
            controller.update(1.0, 2.0);
        }
        assert_eq!(controller.progress(), 0);
        assert_approx_eq!(f64, controller.step(), 1.0 / 0.9);
    }

    #[test]
    fn test_setback_shrinks_step_and_resets_progress() {
        let mut controller = StepController::<f64>::new();
        controller.update(1.0, 2.0);
        controller.update(1.0, 2.0);
        controller.update(3.0, 2.0);
        assert_eq!(controller.progress(), 0);
        assert_approx_eq!(f64, controller.step(), 0.9);
    }

    #[test]
    fn test_equal_energy_counts_as_setback() {
        let mut controller = StepController::<f32>::new();
        controller.update(2.0, 2.0);
        assert_approx_eq!(f32, controller.step(), 0.9);
    }

    #[test]
    fn test_first_update_against_infinity_is_progress() {
        let mut controller = StepController::<f64>::new();
        controller.update(1e12, f64::INFINITY);
        assert_eq!(controller.progress(), 1);
    }

    #[test]
    fn test_step_stays_positive_after_many_setbacks() {
        let mut controller = StepController::<f32>::new();
        for _ in 0..5000 {
            controller.update(1.0, 0.0);
        }
        assert!(controller.step() > 0.0);
    }
}
