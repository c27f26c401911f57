//! Error types for neurochip_core.
//!
//! Physical wear-out is not an error: a degraded cell simply reads zero.
//! Errors here cover configuration problems and bad addresses coming from
//! external drivers.

use thiserror::Error;

/// Main error type for chip operations.
#[derive(Error, Debug)]
pub enum ChipError {
    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file is not valid TOML or has the wrong shape
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Reading the configuration file failed
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// A driver named a layer, neuron or synapse that does not exist
    #[error("No synapse at layer {layer}, neuron {neuron}, synapse {synapse}")]
    AddressOutOfRange {
        layer: usize,
        neuron: usize,
        synapse: usize,
    },

    /// A driver named a neuron that does not exist
    #[error("No neuron at layer {layer}, index {neuron}")]
    NeuronOutOfRange { layer: usize, neuron: usize },

    /// Programming weight is not a finite number
    #[error("Weight must be finite, got {0}")]
    InvalidWeight(f64),

    /// Programming target is not a finite, positive resistance
    #[error("Target resistance must be finite and positive, got {0}")]
    InvalidTarget(f64),
}

/// Result type alias for neurochip_core operations.
pub type Result<T> = std::result::Result<T, ChipError>;

impl ChipError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    #[must_use]
    pub fn address(layer: usize, neuron: usize, synapse: usize) -> Self {
        Self::AddressOutOfRange {
            layer,
            neuron,
            synapse,
        }
    }

    #[must_use]
    pub fn neuron(layer: usize, neuron: usize) -> Self {
        Self::NeuronOutOfRange { layer, neuron }
    }
}
