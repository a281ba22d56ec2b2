//! Core data models for duration conversion.

mod interval;
mod unit;

pub use interval::*;
pub use unit::*;

/// Canonical duration value: a non-negative count of seconds.
pub type Seconds = u64;
