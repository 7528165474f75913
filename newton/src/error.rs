use thiserror::Error;

/// Why a Newton-Raphson iteration did not produce a root.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootError {
    /// The derivative vanished exactly, so the Newton step is undefined.
    #[error("stationary point reached at iteration {iteration}")]
    StationaryPoint { iteration: usize },

    /// The residual never dropped below the precision goal.
    #[error("no convergence within {max_iterations} iterations")]
    MaxIterations { max_iterations: usize },
}

/// Rejected fractal or solver settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid resolution must be at least 1")]
    ZeroResolution,

    #[error("{axis} range [{min}, {max}] is not finite")]
    NonFiniteRange {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{axis} range [{min}, {max}] is empty or inverted")]
    EmptyRange {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("precision goal must be positive and finite, got {0}")]
    PrecisionGoal(f64),

    #[error("iteration cap must be at least 1")]
    ZeroIterations,

    #[error("root tolerances must be non-negative and finite (atol={atol}, rtol={rtol})")]
    Tolerance { atol: f64, rtol: f64 },

    #[error("polynomial has no coefficients")]
    EmptyPolynomial,
}
