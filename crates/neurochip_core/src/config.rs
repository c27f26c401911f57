//! Configuration management for chip parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every section falls back to its defaults, so a file
//! only needs the keys it overrides.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [material]
//! resistance_min = 10000.0
//! resistance_max = 1000000.0
//! variability = 0.04
//!
//! [topology]
//! num_layers = 8
//! neurons_per_layer = 1250
//!
//! [simulation]
//! seed = 42
//! ```
//!
//! The configuration is validated once and then shared read-only by every
//! cell and neuron on the chip.

use crate::error::{ChipError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

macro_rules! ensure {
    ($cond:expr, $msg:expr) => {
        if !($cond) {
            return Err(ChipError::config($msg));
        }
    };
}

/// HfO₂ / graphene material properties.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MaterialConfig {
    /// Graphene substrate conductivity, W/mK. Folded into `thermal.thermal_resistance`.
    pub thermal_conductivity: f64,
    /// Lower edge of the operating range, ohms.
    pub resistance_min: f64,
    /// Upper edge of the operating range, ohms.
    pub resistance_max: f64,
    /// Design target for freshly fabricated cells, ohms.
    pub target_resistance: f64,
    /// Fractional device-to-device variation. Half of it is the log10 sigma.
    pub variability: f64,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            thermal_conductivity: 5000.0,
            resistance_min: 10e3,
            resistance_max: 1e6,
            target_resistance: 100e3,
            variability: 0.04,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TopologyConfig {
    pub num_layers: usize,
    pub neurons_per_layer: usize,
    pub synapses_per_neuron: usize,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            num_layers: 8,
            neurons_per_layer: 1250,
            synapses_per_neuron: 100,
        }
    }
}

/// Pulse response and wear-out of a single cell.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DeviceConfig {
    /// Pulses strictly above this voltage SET the cell.
    pub set_threshold: f64,
    /// Pulses strictly below this voltage RESET the cell.
    pub reset_threshold: f64,
    pub set_factor: f64,
    pub reset_factor: f64,
    /// Cycle count after which wear-out failures become possible.
    pub endurance_cycles: u64,
    /// Per-pulse failure probability past the endurance limit.
    pub failure_probability: f64,
    pub read_voltage: f64,
    /// Resistance values retained per cell. Zero disables history.
    pub history_capacity: usize,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            set_threshold: 1.0,
            reset_threshold: -1.0,
            set_factor: 0.97,
            reset_factor: 1.03,
            endurance_cycles: 10_000,
            failure_probability: 1e-4,
            read_voltage: 0.2,
            history_capacity: 0,
        }
    }
}

/// Upper bound on `device.history_capacity`.
pub const MAX_HISTORY_CAPACITY: usize = 4096;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NeuronConfig {
    pub threshold_min: f64,
    pub threshold_max: f64,
    /// Fraction of the potential kept per step.
    pub leak: f64,
    /// Weight of the fresh input current per step.
    pub integration_gain: f64,
    /// Sigmoid steepness.
    pub steepness: f64,
}

impl Default for NeuronConfig {
    fn default() -> Self {
        Self {
            threshold_min: 0.3,
            threshold_max: 0.7,
            leak: 0.9,
            integration_gain: 0.1,
            steepness: 5.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ThermalConfig {
    /// Kelvin.
    pub ambient: f64,
    /// Effective K/W of the graphene heat spreader.
    pub thermal_resistance: f64,
    /// Added to the power accumulator per spike.
    pub spike_energy: f64,
    /// Random stimulus entries are drawn from `[0, stimulus_amplitude)`.
    pub stimulus_amplitude: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            ambient: 300.0,
            thermal_resistance: 0.1,
            spike_energy: 1e-11,
            stimulus_amplitude: 0.5,
        }
    }
}

/// Closed-loop resistance programming.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ProgrammingConfig {
    pub set_voltage: f64,
    pub reset_voltage: f64,
    /// Seconds per programming pulse.
    pub pulse_duration: f64,
    /// Relative error at which programming stops.
    pub tolerance: f64,
    pub max_pulses: usize,
}

impl Default for ProgrammingConfig {
    fn default() -> Self {
        Self {
            set_voltage: 1.5,
            reset_voltage: -1.5,
            pulse_duration: 10e-9,
            tolerance: 0.01,
            max_pulses: 1000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Time each stimulus with a wall clock.
    pub measure_latency: bool,
    /// Scan statistics with rayon.
    pub parallel_stats: bool,
    /// Stimuli between progress log lines.
    pub log_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            measure_latency: false,
            parallel_stats: true,
            log_interval: 1000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ChipConfig {
    pub material: MaterialConfig,
    pub topology: TopologyConfig,
    pub device: DeviceConfig,
    pub neuron: NeuronConfig,
    pub thermal: ThermalConfig,
    pub programming: ProgrammingConfig,
    pub simulation: SimulationConfig,
}

impl ChipConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns the first violated rule as [`ChipError::InvalidConfig`].
    pub fn validate(&self) -> Result<()> {
        let m = &self.material;
        ensure!(
            m.resistance_min.is_finite() && m.resistance_min > 0.0,
            "resistance_min must be positive"
        );
        ensure!(
            m.resistance_max.is_finite() && m.resistance_max > 0.0,
            "resistance_max must be positive"
        );
        ensure!(
            m.resistance_min <= m.resistance_max,
            "resistance_min must not exceed resistance_max"
        );
        ensure!(
            m.target_resistance >= m.resistance_min && m.target_resistance <= m.resistance_max,
            "target_resistance must lie within [resistance_min, resistance_max]"
        );
        ensure!(
            m.variability.is_finite() && m.variability >= 0.0,
            "variability must be non-negative"
        );
        ensure!(
            m.thermal_conductivity >= 0.0,
            "thermal_conductivity must be non-negative"
        );

        let t = &self.topology;
        ensure!(t.num_layers > 0, "num_layers must be positive");
        ensure!(t.neurons_per_layer > 0, "neurons_per_layer must be positive");
        ensure!(
            t.synapses_per_neuron > 0,
            "synapses_per_neuron must be positive"
        );

        let d = &self.device;
        ensure!(
            d.set_threshold > d.reset_threshold,
            "set_threshold must be above reset_threshold"
        );
        ensure!(
            d.set_factor > 0.0 && d.set_factor < 1.0,
            "set_factor must be in (0.0, 1.0)"
        );
        ensure!(d.reset_factor > 1.0, "reset_factor must be above 1.0");
        ensure!(
            (0.0..=1.0).contains(&d.failure_probability),
            "failure_probability must be in [0.0, 1.0]"
        );
        ensure!(
            d.history_capacity <= MAX_HISTORY_CAPACITY,
            format!("history_capacity must not exceed {MAX_HISTORY_CAPACITY}")
        );

        let n = &self.neuron;
        ensure!(
            n.threshold_min <= n.threshold_max,
            "threshold_min must not exceed threshold_max"
        );
        ensure!((0.0..=1.0).contains(&n.leak), "leak must be in [0.0, 1.0]");
        ensure!(
            n.integration_gain >= 0.0,
            "integration_gain must be non-negative"
        );
        ensure!(n.steepness >= 0.0, "steepness must be non-negative");

        let th = &self.thermal;
        ensure!(
            th.ambient.is_finite() && th.ambient >= 0.0,
            "ambient must be finite, non-negative Kelvin"
        );
        ensure!(
            th.thermal_resistance.is_finite() && th.thermal_resistance >= 0.0,
            "thermal_resistance must be finite and non-negative"
        );
        ensure!(
            th.spike_energy.is_finite() && th.spike_energy >= 0.0,
            "spike_energy must be finite and non-negative"
        );
        ensure!(
            th.stimulus_amplitude.is_finite() && th.stimulus_amplitude >= 0.0,
            "stimulus_amplitude must be finite and non-negative"
        );

        let p = &self.programming;
        ensure!(
            p.set_voltage > d.set_threshold,
            "programming set_voltage must exceed set_threshold"
        );
        ensure!(
            p.reset_voltage < d.reset_threshold,
            "programming reset_voltage must be below reset_threshold"
        );
        ensure!(
            p.tolerance > 0.0 && p.tolerance < 1.0,
            "tolerance must be in (0.0, 1.0)"
        );
        ensure!(p.max_pulses > 0, "max_pulses must be positive");
        ensure!(p.pulse_duration >= 0.0, "pulse_duration must be non-negative");

        ensure!(
            self.simulation.log_interval > 0,
            "log_interval must be positive"
        );

        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Total neurons the topology describes.
    #[must_use]
    pub fn total_neurons(&self) -> usize {
        self.topology.num_layers * self.topology.neurons_per_layer
    }

    /// Digest of the physical sections; run settings are excluded.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.material).as_bytes());
        hasher.update(format!("{:?}", self.topology).as_bytes());
        hasher.update(format!("{:?}", self.device).as_bytes());
        hasher.update(format!("{:?}", self.neuron).as_bytes());
        hasher.update(format!("{:?}", self.thermal).as_bytes());
        hasher.update(format!("{:?}", self.programming).as_bytes());
        hex::encode(hasher.finalize())
    }
}
