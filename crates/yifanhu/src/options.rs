//! Layout options and validated parameters.
//!
//! [`LayoutOptions`] is the user-facing, deserializable bundle of tuning
//! knobs. When a [`Layout`](crate::Layout) is built, the options are checked
//! and converted into [`LayoutParameters`] at the layout's scalar precision.
//!
//! # Example
//!
//! ```
//! # use yifanhu::{LayoutOptions, UpdateMode};
//! let options = LayoutOptions::default()
//!     .with_k(2.0)
//!     .with_iterations(250)
//!     .with_update_mode(UpdateMode::GaussSeidel);
//!
//! assert_eq!(options.k(), 2.0);
//! assert_eq!(options.c(), 0.2);
//! assert_eq!(options.iterations(), 250);
//! ```

use std::str::FromStr;

use serde::Deserialize;

use yifanhu_core::geometry::Scalar;

use crate::error::LayoutError;

/// How positions are updated within one sweep.
///
/// # Variants
///
/// - `Jacobi` - Forces are computed from a snapshot taken at the start of the
///   sweep and all moves are applied afterwards. Node updates are independent
///   and computed in parallel (default).
/// - `GaussSeidel` - Nodes move in index order and later nodes see the moved
///   positions of earlier ones. Strictly sequential.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    #[default]
    Jacobi,
    GaussSeidel,
}

impl FromStr for UpdateMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jacobi" => Ok(Self::Jacobi),
            "gauss_seidel" => Ok(Self::GaussSeidel),
            _ => Err("Unsupported update mode"),
        }
    }
}

impl From<UpdateMode> for &'static str {
    fn from(val: UpdateMode) -> Self {
        match val {
            UpdateMode::Jacobi => "jacobi",
            UpdateMode::GaussSeidel => "gauss_seidel",
        }
    }
}

/// Tuning options for a layout run.
///
/// Every field falls back to its default when missing from a deserialized
/// source:
///
/// | field          | default  | meaning                                        |
/// |----------------|----------|------------------------------------------------|
/// | `tol`          | `1.0`    | convergence tolerance, relative to `k`         |
/// | `c`            | `0.2`    | repulsion strength                             |
/// | `k`            | `1.0`    | natural edge length                            |
/// | `iterations`   | `100`    | sweep budget                                   |
/// | `min_distance` | `1e-6`   | floor applied to pairwise distances            |
/// | `update_mode`  | `jacobi` | see [`UpdateMode`]                             |
/// | `seed`         | none     | seed for random start positions                |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    tol: f64,

    #[serde(alias = "C")]
    c: f64,

    #[serde(alias = "K")]
    k: f64,

    iterations: usize,

    min_distance: f64,

    update_mode: UpdateMode,

    seed: Option<u64>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            tol: 1.0,
            c: 0.2,
            k: 1.0,
            iterations: 100,
            min_distance: 1e-6,
            update_mode: UpdateMode::default(),
            seed: None,
        }
    }
}

impl LayoutOptions {
    /// Returns the convergence tolerance.
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Returns the repulsion strength.
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Returns the natural edge length.
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Returns the sweep budget.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the distance floor.
    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Returns the [`UpdateMode`].
    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    /// Returns the seed for random start positions, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Sets the convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Sets the repulsion strength.
    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    /// Sets the natural edge length.
    pub fn with_k(mut self, k: f64) -> Self {
        self.k = k;
        self
    }

    /// Sets the sweep budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the distance floor.
    pub fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Sets the [`UpdateMode`].
    pub fn with_update_mode(mut self, update_mode: UpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }

    /// Sets the seed for random start positions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Validated layout parameters at scalar precision `T`.
///
/// Immutable once built; see [`LayoutOptions`] for the meaning of each value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParameters<T> {
    tol: T,
    c: T,
    k: T,
    max_iterations: usize,
    min_distance: T,
    update_mode: UpdateMode,
}

impl<T: Scalar> LayoutParameters<T> {
    /// Checks `options` and converts them to precision `T`.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::NonPositive`] if `k`, `tol` or `min_distance` is not
    ///   strictly positive and finite after conversion
    /// - [`LayoutError::NonFinite`] if `c` is not finite after conversion
    /// - [`LayoutError::ZeroIterations`] if the sweep budget is zero
    pub fn from_options(options: &LayoutOptions) -> Result<Self, LayoutError> {
        let k = positive("k", options.k())?;
        let tol = positive("tol", options.tol())?;
        let min_distance = positive("min_distance", options.min_distance())?;

        let c = T::from_f64(options.c());
        if !c.is_finite() {
            return Err(LayoutError::NonFinite {
                name: "c",
                value: options.c(),
            });
        }

        if options.iterations() == 0 {
            return Err(LayoutError::ZeroIterations);
        }

        Ok(Self {
            tol,
            c,
            k,
            max_iterations: options.iterations(),
            min_distance,
            update_mode: options.update_mode(),
        })
    }

    /// Returns the convergence tolerance.
    pub fn tol(&self) -> T {
        self.tol
    }

    /// Returns the repulsion strength.
    pub fn c(&self) -> T {
        self.c
    }

    /// Returns the natural edge length.
    pub fn k(&self) -> T {
        self.k
    }

    /// Returns the sweep budget.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Returns the distance floor.
    pub fn min_distance(&self) -> T {
        self.min_distance
    }

    /// Returns the [`UpdateMode`].
    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    /// Displacement below which a node counts as settled: `k * tol`.
    pub fn displacement_threshold(&self) -> T {
        self.k * self.tol
    }
}

fn positive<T: Scalar>(name: &'static str, value: f64) -> Result<T, LayoutError> {
    let converted = T::from_f64(value);
    if converted > T::ZERO && converted.is_finite() {
        Ok(converted)
    } else {
        Err(LayoutError::NonPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let options = LayoutOptions::default();
        assert_eq!(options.tol(), 1.0);
        assert_eq!(options.c(), 0.2);
        assert_eq!(options.k(), 1.0);
        assert_eq!(options.iterations(), 100);
        assert_eq!(options.update_mode(), UpdateMode::Jacobi);
        assert_eq!(options.seed(), None);
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let options: LayoutOptions = toml::from_str(
            r#"
            K = 2.5
            iterations = 10
            update_mode = "gauss_seidel"
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(options.k(), 2.5);
        assert_eq!(options.iterations(), 10);
        assert_eq!(options.update_mode(), UpdateMode::GaussSeidel);
        assert_eq!(options.seed(), Some(7));
        assert_eq!(options.c(), 0.2);
        assert_eq!(options.tol(), 1.0);
    }

    #[test]
    fn test_update_mode_from_str() {
        assert_eq!("jacobi".parse::<UpdateMode>(), Ok(UpdateMode::Jacobi));
        assert_eq!("gauss_seidel".parse::<UpdateMode>(), Ok(UpdateMode::GaussSeidel));
        assert!("sor".parse::<UpdateMode>().is_err());

        let name: &'static str = UpdateMode::GaussSeidel.into();
        assert_eq!(name, "gauss_seidel");
    }

    #[test]
    fn test_parameters_from_defaults() {
        let params = LayoutParameters::<f64>::from_options(&LayoutOptions::default()).unwrap();
        assert_approx_eq!(f64, params.displacement_threshold(), 1.0);
        assert_eq!(params.max_iterations(), 100);
    }

    #[test]
    fn test_non_positive_k_rejected() {
        let err = LayoutParameters::<f64>::from_options(&LayoutOptions::default().with_k(0.0))
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::NonPositive {
                name: "k",
                value: 0.0
            }
        );
    }

    #[test]
    fn test_negative_tol_rejected() {
        let err = LayoutParameters::<f32>::from_options(&LayoutOptions::default().with_tol(-1.0))
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::NonPositive {
                name: "tol",
                value: -1.0
            }
        );
    }

    #[test]
    fn test_overflowing_precision_rejected() {
        // Representable as f64, infinite once narrowed to f32.
        let options = LayoutOptions::default().with_k(1e300);
        assert!(LayoutParameters::<f64>::from_options(&options).is_ok());
        assert!(matches!(
            LayoutParameters::<f32>::from_options(&options),
            Err(LayoutError::NonPositive { name: "k", .. })
        ));
    }

    #[test]
    fn test_non_finite_c_rejected() {
        let err =
            LayoutParameters::<f64>::from_options(&LayoutOptions::default().with_c(f64::NAN))
                .unwrap_err();
        assert!(matches!(err, LayoutError::NonFinite { name: "c", .. }));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err =
            LayoutParameters::<f64>::from_options(&LayoutOptions::default().with_iterations(0))
                .unwrap_err();
        assert_eq!(err, LayoutError::ZeroIterations);
    }
}
