use num::complex::Complex64;

use crate::error::ConfigError;

/// Absolute tolerance when matching a root against the known ones.
pub const ROOT_ATOL: f64 = 1.0e-8;
/// Relative tolerance, scaled by the modulus of the candidate root.
pub const ROOT_RTOL: f64 = 1.0e-5;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RootTolerance {
    pub atol: f64,
    pub rtol: f64,
}

impl Default for RootTolerance {
    fn default() -> Self {
        Self {
            atol: ROOT_ATOL,
            rtol: ROOT_RTOL,
        }
    }
}

impl RootTolerance {
    /// Pure absolute tolerance, no relative term.
    pub fn absolute(atol: f64) -> Self {
        Self { atol, rtol: 0.0 }
    }

    /// `|known - candidate| <= atol + rtol * |candidate|`
    pub fn matches(&self, known: Complex64, candidate: Complex64) -> bool {
        (known - candidate).norm() <= self.atol + self.rtol * candidate.norm()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |t: f64| t.is_finite() && t >= 0.0;
        if ok(self.atol) && ok(self.rtol) {
            Ok(())
        } else {
            Err(ConfigError::Tolerance {
                atol: self.atol,
                rtol: self.rtol,
            })
        }
    }
}

/// Distinct roots in order of discovery.
///
/// A root's position is its index in the fractal grid, so entries are only
/// ever appended.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RootRegistry {
    roots: Vec<Complex64>,
    tolerance: RootTolerance,
}

impl RootRegistry {
    pub fn new(tolerance: RootTolerance) -> Self {
        Self {
            roots: vec![],
            tolerance,
        }
    }

    pub fn find(&self, root: Complex64) -> Option<usize> {
        self.roots
            .iter()
            .position(|&known| self.tolerance.matches(known, root))
    }

    /// Index of the known root matching `root`, registering it if there is
    /// none yet.
    pub fn index_of(&mut self, root: Complex64) -> usize {
        if let Some(index) = self.find(root) {
            return index;
        }
        log::debug!("New root #{} at {root:.8}", self.roots.len());
        self.roots.push(root);
        self.roots.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<Complex64> {
        self.roots.get(index).copied()
    }

    pub fn roots(&self) -> &[Complex64] {
        &self.roots
    }

    pub fn tolerance(&self) -> RootTolerance {
        self.tolerance
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
