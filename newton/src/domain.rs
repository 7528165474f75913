use crate::error::ConfigError;

/// Rectangle `[x_min, x_max] × [y_min, y_max]` of the complex plane, with
/// `z = x + iy`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Domain {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Domain {
    fn default() -> Self {
        Self::new(-1.0, 1.0, -1.0, 1.0)
    }
}

impl Domain {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("real", self.x_min, self.x_max)?;
        check_range("imaginary", self.y_min, self.y_max)
    }

    /// The `n` real parts of the grid, `x_min` and `x_max` included.
    pub fn xs(&self, n: usize) -> Linspace {
        linspace(self.x_min, self.x_max, n)
    }

    /// The `n` imaginary parts of the grid, `y_min` and `y_max` included.
    pub fn ys(&self, n: usize) -> Linspace {
        linspace(self.y_min, self.y_max, n)
    }
}

fn check_range(axis: &'static str, min: f64, max: f64) -> Result<(), ConfigError> {
    if !(min.is_finite() && max.is_finite()) {
        return Err(ConfigError::NonFiniteRange { axis, min, max });
    }
    if min >= max {
        return Err(ConfigError::EmptyRange { axis, min, max });
    }
    Ok(())
}

/// `n` evenly spaced values from `start` to `end`, both ends included.
///
/// A single point sits at `start`; the last of several is exactly `end`.
pub fn linspace(start: f64, end: f64, n: usize) -> Linspace {
    let step = if n > 1 {
        (end - start) / (n - 1) as f64
    } else {
        0.0
    };
    Linspace {
        start,
        end,
        step,
        n,
        i: 0,
    }
}

#[derive(Debug, Clone)]
pub struct Linspace {
    start: f64,
    end: f64,
    step: f64,
    n: usize,
    i: usize,
}

impl Iterator for Linspace {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.i >= self.n {
            return None;
        }
        let value = if self.n > 1 && self.i == self.n - 1 {
            self.end
        } else {
            self.start + self.i as f64 * self.step
        };
        self.i += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.n - self.i;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Linspace {}
