//! # Neurochip Core
//!
//! Device-level simulation of a layered neuromorphic chip whose synapses are
//! HfO₂ memristors on a graphene heat spreader.
//!
//! This crate contains the simulation logic, including:
//! - Log-normal memristor fabrication, SET/RESET pulses and wear-out
//! - Stochastic leaky integrate-and-fire neurons with sigmoid firing
//! - Chip-level stimulus, power and thermal bookkeeping
//! - Population statistics, closed-loop programming and read noise
//!
//! ## Determinism
//!
//! Every random draw comes from the chip's own `ChaCha8Rng`, seeded from the
//! configuration or injected by the caller.
//!
//! ## Example
//!
//! ```
//! use neurochip_core::config::{ChipConfig, TopologyConfig};
//! use neurochip_core::NeuromorphicChip;
//!
//! let mut config = ChipConfig {
//!     topology: TopologyConfig {
//!         num_layers: 2,
//!         neurons_per_layer: 16,
//!         synapses_per_neuron: 32,
//!     },
//!     ..Default::default()
//! };
//! config.simulation.seed = Some(42);
//!
//! let mut chip = NeuromorphicChip::new(config).unwrap();
//! for _ in 0..100 {
//!     chip.drive_random_stimulus();
//! }
//! let stats = chip.stats();
//! assert_eq!(stats.neurons, 32);
//! assert_eq!(stats.degraded_percent, 0.0);
//! ```

/// Chip construction, stimulus, pulse entry points and statistics
pub mod chip;
/// Configuration management for chip parameters
pub mod config;
/// Error types
pub mod error;
/// Memristor fabrication, pulse and read rules
pub mod memristor;
/// Run counters and structured logging
pub mod metrics;
/// Stochastic neuron integration and firing
pub mod neuron;
/// Thermal/shot noise and tunneling estimates
pub mod noise;
/// Weight mapping and closed-loop resistance programming
pub mod programming;
/// Population scans
pub mod stats;

pub use chip::{NeuromorphicChip, PulseTrainReport};
pub use config::ChipConfig;
pub use error::{ChipError, Result};
pub use memristor::{MemristorLogic, PulseOutcome};
pub use metrics::{init_logging, Metrics};
pub use neurochip_data::{ChipStats, Memristor, Neuron, Pulse, PulseKind, SynapseAddr};
pub use neuron::NeuronLogic;
pub use noise::NoiseFigure;
pub use programming::ProgramOutcome;
