//! Utility functions and helpers

pub mod validation;

pub use validation::*;
