//! Plain data records for the neurochip simulation.
//!
//! Everything here is state without behaviour; the update rules live in
//! `neurochip_core`.

pub mod data;

pub use data::device::{Memristor, Neuron};
pub use data::pulse::{Pulse, PulseKind, SynapseAddr};
pub use data::stats::ChipStats;
