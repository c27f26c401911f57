use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One HfO₂ resistive cell acting as a synaptic weight.
///
/// The conductance (weight) is always derived from `resistance`; it is never
/// stored separately.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Memristor {
    /// Current resistance in ohms.
    pub resistance: f64,
    /// Number of pulses applied while healthy.
    pub cycles: u64,
    /// Permanent wear-out failure. Once set the cell is frozen.
    pub degraded: bool,
    /// Most recent resistance values, oldest first. Empty when history is disabled.
    #[serde(default)]
    pub history: VecDeque<f64>,
}

impl Memristor {
    /// Conductance in siemens (1/R).
    #[must_use]
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }
}

/// Stochastic integrate-and-fire unit fed by its own bank of memristors.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Neuron {
    /// Network-wide sequential id.
    pub id: usize,
    /// Index of the owning layer.
    pub layer: usize,
    /// Input synapses. The length is fixed at construction.
    pub synapses: Vec<Memristor>,
    /// Firing threshold, sampled once.
    pub threshold: f64,
    /// Membrane potential.
    pub potential: f64,
    pub spike_count: u64,
}

impl Neuron {
    #[must_use]
    pub fn synapse_count(&self) -> usize {
        self.synapses.len()
    }

    /// Number of synapses that have failed permanently.
    #[must_use]
    pub fn degraded_count(&self) -> usize {
        self.synapses.iter().filter(|s| s.degraded).count()
    }
}
