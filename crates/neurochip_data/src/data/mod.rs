//! Core data structures for the neurochip simulation.

pub mod device;
pub mod pulse;
pub mod stats;
