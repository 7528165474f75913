#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod domain;
mod error;
mod fractal;
mod func;
mod grid;
pub mod nr;
mod roots;

pub use config::FractalConfig;
pub use domain::Domain;
pub use error::{ConfigError, RootError};
pub use fractal::{Fractal, FractalSettings};
pub use func::{FnPair, Func, Polynomial};
pub use grid::IndexGrid;
pub use nr::{find_root, SolverSettings};
pub use roots::{RootRegistry, RootTolerance};
