use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of stimulus record understood by the pulse entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PulseKind {
    /// Positive pulse above the SET threshold (lowers resistance).
    Set,
    /// Negative pulse below the RESET threshold (raises resistance).
    Reset,
    /// Idle interval; only advances simulated time.
    Wait,
}

/// A single voltage pulse or idle interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub kind: PulseKind,
    /// Volts. Zero for `Wait`.
    pub voltage: f64,
    /// Seconds.
    pub duration: f64,
}

impl Pulse {
    #[must_use]
    pub fn set(voltage: f64, duration: f64) -> Self {
        Self {
            kind: PulseKind::Set,
            voltage,
            duration,
        }
    }

    #[must_use]
    pub fn reset(voltage: f64, duration: f64) -> Self {
        Self {
            kind: PulseKind::Reset,
            voltage,
            duration,
        }
    }

    #[must_use]
    pub fn wait(duration: f64) -> Self {
        Self {
            kind: PulseKind::Wait,
            voltage: 0.0,
            duration,
        }
    }

    /// Whether this record drives current through a cell.
    #[must_use]
    pub fn is_electrical(&self) -> bool {
        !matches!(self.kind, PulseKind::Wait)
    }
}

/// Location of one synapse inside the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SynapseAddr {
    pub layer: usize,
    pub neuron: usize,
    pub synapse: usize,
}

impl SynapseAddr {
    #[must_use]
    pub fn new(layer: usize, neuron: usize, synapse: usize) -> Self {
        Self {
            layer,
            neuron,
            synapse,
        }
    }
}

impl fmt::Display for SynapseAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}/N{}/S{}", self.layer, self.neuron, self.synapse)
    }
}
