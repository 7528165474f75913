use num::complex::Complex64;

use crate::domain::Domain;
use crate::error::ConfigError;
use crate::func::Func;
use crate::grid::IndexGrid;
use crate::nr::SolverSettings;
use crate::roots::{RootRegistry, RootTolerance};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FractalSettings {
    /// Grid points along each axis.
    pub resolution: usize,
    #[serde(default)]
    pub domain: Domain,
    #[serde(default)]
    pub solver: SolverSettings,
    #[serde(default)]
    pub tolerance: RootTolerance,
}

impl FractalSettings {
    pub fn new(resolution: usize, domain: Domain) -> Self {
        Self {
            resolution,
            domain,
            solver: Default::default(),
            tolerance: Default::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        self.domain.validate()?;
        self.solver.validate()?;
        self.tolerance.validate()
    }
}

/// Basins of attraction of Newton's method over a rectangular grid.
///
/// Built column by column through [`Fractal::update`] so callers can report
/// progress; [`Fractal::compute`] does the whole grid at once. Columns are
/// visited from `x_min` to `x_max` and, within a column, rows from `y_min` to
/// `y_max`. Root indices are handed out in that order, which keeps them
/// stable from one run to the next.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Fractal {
    pub settings: FractalSettings,
    pub grid: IndexGrid,
    pub roots: RootRegistry,
    #[serde(skip)]
    xs: Vec<f64>,
    #[serde(skip)]
    ys: Vec<f64>,
    #[serde(skip)]
    column: usize,
}

impl Fractal {
    pub fn new(settings: FractalSettings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let n = settings.resolution;
        Ok(Self {
            grid: IndexGrid::new(n),
            roots: RootRegistry::new(settings.tolerance),
            xs: settings.domain.xs(n).collect(),
            ys: settings.domain.ys(n).collect(),
            column: 0,
            settings,
        })
    }

    pub fn compute<F>(func: &F, settings: FractalSettings) -> Result<Self, ConfigError>
    where
        F: Func<Complex64> + ?Sized,
    {
        let mut fractal = Self::new(settings)?;
        while !fractal.update(func) {}
        Ok(fractal)
    }

    /// Columns done and total number of columns.
    pub fn progress(&self) -> (usize, usize) {
        (self.column, self.xs.len())
    }

    pub fn is_finished(&self) -> bool {
        self.column >= self.xs.len()
    }

    /// Solves the next column of the grid. Returns `true` once every column
    /// is done.
    pub fn update<F>(&mut self, func: &F) -> bool
    where
        F: Func<Complex64> + ?Sized,
    {
        if self.is_finished() {
            return true;
        }

        let col = self.column;
        let x = self.xs[col];
        for (row, &y) in self.ys.iter().enumerate() {
            let z0 = Complex64::new(x, y);
            let index = match self.settings.solver.solve(func, z0) {
                Ok(root) => Some(self.roots.index_of(root)),
                Err(e) => {
                    log::trace!("No root from {z0}: {e}");
                    None
                }
            };
            self.grid.set(row, col, index);
        }

        self.column += 1;
        if self.is_finished() {
            log::info!(
                "Fractal done: {} roots, {}/{} points converged",
                self.roots.len(),
                self.grid.converged_count(),
                self.grid.len()
            );
        }
        self.is_finished()
    }
}
