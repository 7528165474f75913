use num::complex::ComplexFloat;
use num::Zero;

use crate::error::{ConfigError, RootError};
use crate::func::Func;

pub const PRECISION_GOAL: f64 = 1.0e-6;
pub const MAX_ITERATIONS: usize = 50;

/// Newton-Raphson iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)`.
///
/// Stops as soon as `|f(x_n)| < precision_goal` and returns `x_n`. An exactly
/// vanishing derivative or an exhausted iteration budget are reported as
/// distinct [`RootError`]s. Works for real and complex scalars alike; nothing
/// guards against overflow or NaN, those simply fail to converge.
pub fn find_root<T>(
    f: impl Fn(T) -> T,
    df: impl Fn(T) -> T,
    guess: T,
    precision_goal: T::Real,
    max_iterations: usize,
) -> Result<T, RootError>
where
    T: ComplexFloat,
{
    let mut result = guess;
    for iteration in 0..max_iterations {
        let fx = f(result);
        if fx.abs() < precision_goal {
            return Ok(result);
        }

        let dfx = df(result);
        if dfx.is_zero() {
            return Err(RootError::StationaryPoint { iteration });
        }

        result = result - fx / dfx;
    }
    Err(RootError::MaxIterations { max_iterations })
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub precision_goal: f64,
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            precision_goal: PRECISION_GOAL,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

impl SolverSettings {
    pub fn new(precision_goal: f64, max_iterations: usize) -> Self {
        Self {
            precision_goal,
            max_iterations,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.precision_goal.is_finite() && self.precision_goal > 0.0) {
            return Err(ConfigError::PrecisionGoal(self.precision_goal));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(())
    }

    pub fn solve<T, F>(&self, func: &F, guess: T) -> Result<T, RootError>
    where
        T: ComplexFloat<Real = f64>,
        F: Func<T> + ?Sized,
    {
        find_root(
            |z| func.f(z),
            |z| func.df(z),
            guess,
            self.precision_goal,
            self.max_iterations,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::func::{FnPair, Polynomial};
    use approx::assert_relative_eq;
    use num::complex::Complex64;
    use std::cell::Cell;

    #[test]
    fn sqrt_2() {
        let root = find_root(|x: f64| x * x - 2.0, |x: f64| 2.0 * x, 1.5, 1e-6, 20).unwrap();
        assert_relative_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-6);
    }

    #[test]
    fn converged_guess_is_returned_untouched() {
        // f(0) = 0, so the residual check wins over the zero derivative
        let root = find_root(|x: f64| x * x * x, |x: f64| 3.0 * x * x, 0.0, 1e-6, 20);
        assert_eq!(root, Ok(0.0));
    }

    #[test]
    fn zero_derivative_fails_immediately() {
        let calls = Cell::new(0);
        let result = find_root(
            |x: f64| {
                calls.set(calls.get() + 1);
                x * x * x - 1.0
            },
            |x: f64| 3.0 * x * x,
            0.0,
            1e-6,
            20,
        );
        assert_eq!(result, Err(RootError::StationaryPoint { iteration: 0 }));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn no_real_root_exhausts_budget() {
        let calls = Cell::new(0);
        let result = find_root(
            |x: f64| {
                calls.set(calls.get() + 1);
                x * x + 1.0
            },
            |x: f64| 2.0 * x,
            0.5,
            1e-6,
            10,
        );
        assert_eq!(result, Err(RootError::MaxIterations { max_iterations: 10 }));
        assert_eq!(calls.get(), 10);
    }

    #[test]
    fn complex_iteration_leaves_the_real_axis() {
        // Same function as above, but complex arithmetic reaches +i
        let z = find_root(
            |z: Complex64| z * z + 1.0,
            |z: Complex64| 2.0 * z,
            Complex64::new(0.5, 0.5),
            1e-6,
            50,
        )
        .unwrap();
        assert!((z - Complex64::i()).norm() < 1e-6);
    }

    #[test]
    fn real_demo_polynomial() {
        // x^5 - 5x + 3 has a root between 1 and 2
        let root = find_root(
            |x: f64| x.powi(5) - 5.0 * x + 3.0,
            |x: f64| 5.0 * x.powi(4) - 5.0,
            2.0,
            1e-6,
            20,
        )
        .unwrap();
        assert!((1.0..2.0).contains(&root));
        assert!((root.powi(5) - 5.0 * root + 3.0).abs() < 1e-6);
    }

    #[test]
    fn settings_solve_with_polynomial() {
        let settings = SolverSettings::default();
        let p = Polynomial::roots_of_unity(2);
        let z = settings.solve(&p, Complex64::new(3.0, 0.1)).unwrap();
        assert!((z - 1.0).norm() < 1e-6);

        let pair = FnPair::new(|x: f64| x - 4.0, |_: f64| 1.0);
        assert_relative_eq!(settings.solve(&pair, 0.0_f64).unwrap(), 4.0);
    }

    #[test]
    fn settings_validation() {
        assert!(SolverSettings::default().validate().is_ok());
        assert_eq!(
            SolverSettings::new(0.0, 10).validate(),
            Err(ConfigError::PrecisionGoal(0.0))
        );
        assert_eq!(
            SolverSettings::new(1e-6, 0).validate(),
            Err(ConfigError::ZeroIterations)
        );
    }
}
