//! Evolving a right-hand side over a time grid.

pub mod evolve;
pub mod options;
pub mod sampler;
pub mod trajectory;

pub use evolve::{evolve, time_grid};
pub use options::{AdaptiveMethod, AdaptiveOptions, EulerOptions, Strategy};
pub use trajectory::Trajectory;
