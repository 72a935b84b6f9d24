//! Implicit Radau IIA methods for stiff problems.

mod radau5;

pub use radau5::{contr5, radau5};
