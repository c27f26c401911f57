//! Neurochip: a device-level simulation of a layered neuromorphic chip built
//! from HfO₂ memristor synapses and stochastic neurons.
//!
//! The engine lives in `neurochip_core`; this crate re-exports it under
//! [`model`] and adds the headless runner used by the `neurochip` binary.

pub mod app;
pub mod model;

pub use app::{App, RunReport};
