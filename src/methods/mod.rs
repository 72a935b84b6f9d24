//! Numerical methods

pub mod dp;
pub mod euler;
pub mod hinit;
pub mod radau;
pub mod result;
pub mod settings;
