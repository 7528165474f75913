use num::complex::Complex64;
use num::Zero;

use crate::error::ConfigError;

type C = Complex64;

/// A function together with its derivative.
pub trait Func<T = C> {
    fn f(&self, z: T) -> T;
    fn df(&self, z: T) -> T;
}

/// Function pair built from two closures.
#[derive(Clone, Copy)]
pub struct FnPair<F, D> {
    pub f: F,
    pub df: D,
}

impl<F, D> FnPair<F, D> {
    pub fn new(f: F, df: D) -> Self {
        Self { f, df }
    }
}

impl<T, F, D> Func<T> for FnPair<F, D>
where
    F: Fn(T) -> T,
    D: Fn(T) -> T,
{
    fn f(&self, z: T) -> T {
        (self.f)(z)
    }

    fn df(&self, z: T) -> T {
        (self.df)(z)
    }
}

/// Polynomial with complex coefficients, highest degree first.
///
/// `[1, 0, -1]` is `z^2 - 1`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polynomial {
    pub coefficients: Vec<C>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<C>) -> Self {
        Self { coefficients }
    }

    pub fn from_real(coefficients: &[f64]) -> Self {
        Self::new(coefficients.iter().map(|&c| C::new(c, 0.0)).collect())
    }

    /// `z^n - 1`, whose roots are the n-th roots of unity.
    pub fn roots_of_unity(n: usize) -> Self {
        let mut coefficients = vec![C::zero(); n + 1];
        coefficients[0] = C::new(1.0, 0.0);
        coefficients[n] -= C::new(1.0, 0.0);
        Self { coefficients }
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.coefficients.is_empty() {
            return Err(ConfigError::EmptyPolynomial);
        }
        Ok(())
    }

    /// Evaluates `p(z)` and `p'(z)` in one Horner pass.
    pub fn eval(&self, z: C) -> (C, C) {
        self.coefficients
            .iter()
            .fold((C::zero(), C::zero()), |(p, dp), &c| (p * z + c, dp * z + p))
    }
}

impl Func<C> for Polynomial {
    fn f(&self, z: C) -> C {
        self.eval(z).0
    }

    fn df(&self, z: C) -> C {
        self.eval(z).1
    }
}

impl std::fmt::Display for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let degree = self.degree();
        let terms = self
            .coefficients
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(i, c)| {
                let power = degree - i;
                let c = if c.im == 0.0 {
                    format!("{}", c.re)
                } else {
                    format!("({c})")
                };
                match power {
                    0 => c,
                    1 => format!("{c} z"),
                    _ => format!("{c} z^{power}"),
                }
            })
            .collect::<Vec<_>>();

        if terms.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", terms.join(" + "))
        }
    }
}
