//! Benchmark comparison.

mod comparison;

pub use comparison::*;
