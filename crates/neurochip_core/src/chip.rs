//! The layered neuromorphic chip.
//!
//! The chip owns every neuron (and through them every memristor) plus one
//! seeded RNG. All randomness on the chip flows from that generator in call
//! order, so two chips built from the same config and seed evolve
//! identically under the same sequence of calls.

use crate::config::ChipConfig;
use crate::error::{ChipError, Result};
use crate::memristor::{MemristorLogic, PulseOutcome};
use crate::metrics::Metrics;
use crate::neuron::NeuronLogic;
use crate::noise::{self, NoiseFigure};
use crate::programming::{self, ProgramOutcome};
use crate::stats;
use neurochip_data::{ChipStats, Memristor, Neuron, Pulse, SynapseAddr};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

/// Kelvin to Celsius offset used for reporting.
pub const KELVIN_OFFSET: f64 = 273.0;

/// Summary of replaying a pulse list into one cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PulseTrainReport {
    /// Electrical pulses that reached a healthy cell.
    pub applied: usize,
    /// Simulated time covered by the list, seconds.
    pub elapsed: f64,
    /// The cell failed during the train.
    pub degraded: bool,
}

pub struct NeuromorphicChip {
    config: ChipConfig,
    layers: Vec<Vec<Neuron>>,
    total_neurons: usize,
    /// Kelvin.
    temperature: f64,
    power_draw: f64,
    rng: ChaCha8Rng,
    metrics: Metrics,
}

fn cell_mut(layers: &mut [Vec<Neuron>], addr: SynapseAddr) -> Result<&mut Memristor> {
    layers
        .get_mut(addr.layer)
        .and_then(|layer| layer.get_mut(addr.neuron))
        .and_then(|neuron| neuron.synapses.get_mut(addr.synapse))
        .ok_or_else(|| ChipError::address(addr.layer, addr.neuron, addr.synapse))
}

impl NeuromorphicChip {
    /// Builds a chip, seeding from `simulation.seed` or from entropy.
    pub fn new(config: ChipConfig) -> Result<Self> {
        let rng = match config.simulation.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Builds a chip that draws every random number from `rng`.
    pub fn with_rng(config: ChipConfig, mut rng: ChaCha8Rng) -> Result<Self> {
        config.validate()?;

        let topology = &config.topology;
        let mut layers = Vec::with_capacity(topology.num_layers);
        let mut total = 0;
        for layer in 0..topology.num_layers {
            let neurons: Vec<Neuron> = (0..topology.neurons_per_layer)
                .map(|i| Neuron::new_with_rng(total + i, layer, &config, &mut rng))
                .collect();
            total += neurons.len();
            layers.push(neurons);
        }

        tracing::debug!(
            layers = topology.num_layers,
            neurons = total,
            synapses = total * topology.synapses_per_neuron,
            fingerprint = %config.fingerprint(),
            "Chip fabricated"
        );

        Ok(Self {
            temperature: config.thermal.ambient,
            power_draw: 0.0,
            metrics: Metrics::new(config.simulation.log_interval),
            total_neurons: total,
            layers,
            config,
            rng,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChipConfig {
        &self.config
    }

    #[must_use]
    pub fn layers(&self) -> &[Vec<Neuron>] {
        &self.layers
    }

    #[must_use]
    pub fn neuron(&self, layer: usize, index: usize) -> Option<&Neuron> {
        self.layers.get(layer).and_then(|l| l.get(index))
    }

    #[must_use]
    pub fn synapse(&self, addr: SynapseAddr) -> Option<&Memristor> {
        self.neuron(addr.layer, addr.neuron)
            .and_then(|n| n.synapses.get(addr.synapse))
    }

    #[must_use]
    pub fn total_neurons(&self) -> usize {
        self.total_neurons
    }

    #[must_use]
    pub fn total_synapses(&self) -> usize {
        self.layers.iter().flatten().map(|n| n.synapses.len()).sum()
    }

    /// Last computed temperature, Kelvin.
    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Accumulated spike energy. Never decreases.
    #[must_use]
    pub fn power_draw(&self) -> f64 {
        self.power_draw
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// First-order graphene heat sink: `T = ambient + P · R_th`.
    ///
    /// Stores the new temperature and returns it in Celsius.
    pub fn thermal_step(&mut self, ambient: f64) -> f64 {
        self.temperature = ambient + self.power_draw * self.config.thermal.thermal_resistance;
        self.temperature - KELVIN_OFFSET
    }

    /// [`thermal_step`](Self::thermal_step) at the configured ambient.
    pub fn thermal_step_default(&mut self) -> f64 {
        self.thermal_step(self.config.thermal.ambient)
    }

    /// Drives one random input vector into one random neuron.
    ///
    /// Returns the wall-clock time spent in the neuron, or zero when latency
    /// measurement is off.
    pub fn drive_random_stimulus(&mut self) -> Duration {
        let topology = &self.config.topology;
        let layer = self.rng.gen_range(0..topology.num_layers);
        let index = self.rng.gen_range(0..topology.neurons_per_layer);
        let amplitude = self.config.thermal.stimulus_amplitude;
        let inputs: Vec<f64> = (0..topology.synapses_per_neuron)
            .map(|_| self.rng.gen::<f64>() * amplitude)
            .collect();

        let start = self.config.simulation.measure_latency.then(Instant::now);
        let spike = self.layers[layer][index].process(&inputs, &self.config, &mut self.rng);
        let latency = start.map(|s| s.elapsed()).unwrap_or_default();

        let fired = spike > 0.0;
        if fired {
            self.power_draw += self.config.thermal.spike_energy;
        }
        self.metrics.record_stimulus(latency, fired, self.power_draw);
        latency
    }

    /// Drives `inputs` into a specific neuron.
    ///
    /// Unlike [`drive_random_stimulus`](Self::drive_random_stimulus) this
    /// does not touch the power accumulator.
    pub fn process(&mut self, layer: usize, index: usize, inputs: &[f64]) -> Result<f64> {
        let neuron = self
            .layers
            .get_mut(layer)
            .and_then(|l| l.get_mut(index))
            .ok_or_else(|| ChipError::neuron(layer, index))?;
        Ok(neuron.process(inputs, &self.config, &mut self.rng))
    }

    /// Applies one voltage pulse to one synapse.
    pub fn apply_pulse(&mut self, addr: SynapseAddr, voltage: f64) -> Result<PulseOutcome> {
        let cell = cell_mut(&mut self.layers, addr)?;
        let outcome = cell.pulse(voltage, &self.config, &mut self.rng);
        match outcome {
            PulseOutcome::Ignored => {}
            PulseOutcome::Applied => self.metrics.record_pulse(),
            PulseOutcome::Failed => {
                self.metrics.record_pulse();
                self.metrics
                    .record_degradation(&addr.to_string(), cell.cycles);
            }
        }
        Ok(outcome)
    }

    /// Replays a pulse list into one synapse in order.
    pub fn apply_pulse_train(
        &mut self,
        addr: SynapseAddr,
        pulses: &[Pulse],
    ) -> Result<PulseTrainReport> {
        cell_mut(&mut self.layers, addr)?;

        let mut report = PulseTrainReport::default();
        for pulse in pulses {
            report.elapsed += pulse.duration;
            if !pulse.is_electrical() {
                continue;
            }
            match self.apply_pulse(addr, pulse.voltage)? {
                PulseOutcome::Ignored => {}
                PulseOutcome::Applied => report.applied += 1,
                PulseOutcome::Failed => {
                    report.applied += 1;
                    report.degraded = true;
                }
            }
        }
        Ok(report)
    }

    /// Closed-loop programming of one synapse to `target` ohms.
    ///
    /// Non-finite or non-positive targets are rejected before any pulse.
    pub fn program_synapse(&mut self, addr: SynapseAddr, target: f64) -> Result<ProgramOutcome> {
        if !(target.is_finite() && target > 0.0) {
            return Err(ChipError::InvalidTarget(target));
        }
        let cell = cell_mut(&mut self.layers, addr)?;
        let already_failed = cell.degraded;
        let outcome = programming::program_to_target(cell, target, &self.config, &mut self.rng);
        for _ in 0..outcome.pulses {
            self.metrics.record_pulse();
        }
        if outcome.degraded && !already_failed {
            self.metrics
                .record_degradation(&addr.to_string(), cell.cycles);
        }
        Ok(outcome)
    }

    /// Programs one synapse to the resistance encoding `weight` in `[0, 1]`.
    pub fn program_weight(&mut self, addr: SynapseAddr, weight: f64) -> Result<ProgramOutcome> {
        if !weight.is_finite() {
            return Err(ChipError::InvalidWeight(weight));
        }
        let target = programming::weight_to_resistance(weight, &self.config.material);
        self.program_synapse(addr, target)
    }

    /// Read current of one synapse; `None` uses the configured read voltage.
    pub fn read_synapse(&self, addr: SynapseAddr, voltage: Option<f64>) -> Result<f64> {
        let cell = self
            .synapse(addr)
            .ok_or_else(|| ChipError::address(addr.layer, addr.neuron, addr.synapse))?;
        Ok(cell.read(voltage.unwrap_or(self.config.device.read_voltage)))
    }

    /// Thermal and shot noise of a default read at the chip's temperature.
    pub fn synapse_noise(&self, addr: SynapseAddr, bandwidth_hz: f64) -> Result<NoiseFigure> {
        let cell = self
            .synapse(addr)
            .ok_or_else(|| ChipError::address(addr.layer, addr.neuron, addr.synapse))?;
        let signal = cell.read(self.config.device.read_voltage);
        Ok(NoiseFigure {
            thermal_v: noise::thermal_noise(cell.resistance, bandwidth_hz, self.temperature),
            shot_a: noise::shot_noise(signal, bandwidth_hz),
            signal_a: signal,
        })
    }

    /// Population statistics. Refreshes the temperature at the configured
    /// ambient; nothing else is modified.
    pub fn stats(&mut self) -> ChipStats {
        let summary = stats::summarize(&self.layers, self.config.simulation.parallel_stats);
        let temperature_c = self.thermal_step_default();
        ChipStats {
            neurons: self.total_neurons,
            synapses: summary.synapses,
            mean_resistance: summary.mean,
            std_resistance: summary.std_dev,
            variability_percent: summary.variability_percent(),
            degraded_percent: summary.degraded_percent(),
            temperature_c,
            power_w: self.power_draw,
        }
    }
}
