//! Bayesian (stochastic) neuron logic.
//!
//! A neuron sums the currents through its own memristor bank, leaks, and
//! fires with a sigmoid probability. Firing resets the potential to zero.

use crate::config::ChipConfig;
use crate::memristor::MemristorLogic;
pub use neurochip_data::{Memristor, Neuron};
use rand::Rng;

pub trait NeuronLogic {
    /// Builds a neuron with a freshly fabricated synapse bank.
    fn new_with_rng<R: Rng>(id: usize, layer: usize, config: &ChipConfig, rng: &mut R) -> Self;

    /// Sum of `inputs[i] / R_i` over the first `min(inputs, synapses)` positions.
    #[must_use]
    fn input_current(&self, inputs: &[f64]) -> f64;

    /// Spike probability for the current potential.
    #[must_use]
    fn fire_probability(&self, config: &ChipConfig) -> f64;

    /// Integrates one input vector and rolls for a spike.
    ///
    /// Returns the firing probability when the neuron spikes, `0.0` otherwise.
    fn process<R: Rng>(&mut self, inputs: &[f64], config: &ChipConfig, rng: &mut R) -> f64;
}

impl NeuronLogic for Neuron {
    fn new_with_rng<R: Rng>(id: usize, layer: usize, config: &ChipConfig, rng: &mut R) -> Self {
        let synapses = (0..config.topology.synapses_per_neuron)
            .map(|_| Memristor::new_with_rng(config, None, rng))
            .collect();
        let n = &config.neuron;
        let threshold = if n.threshold_max > n.threshold_min {
            rng.gen_range(n.threshold_min..n.threshold_max)
        } else {
            n.threshold_min
        };

        Neuron {
            id,
            layer,
            synapses,
            threshold,
            potential: 0.0,
            spike_count: 0,
        }
    }

    fn input_current(&self, inputs: &[f64]) -> f64 {
        // Raw resistance on purpose: a degraded cell still conducts during
        // integration even though `read` on it returns zero.
        inputs
            .iter()
            .zip(&self.synapses)
            .map(|(v, syn)| v / syn.resistance)
            .sum()
    }

    fn fire_probability(&self, config: &ChipConfig) -> f64 {
        sigmoid((self.potential - self.threshold) * config.neuron.steepness)
    }

    fn process<R: Rng>(&mut self, inputs: &[f64], config: &ChipConfig, rng: &mut R) -> f64 {
        let total_current = self.input_current(inputs);
        let n = &config.neuron;
        self.potential = n.leak * self.potential + n.integration_gain * total_current;

        let probability = self.fire_probability(config);
        if should_fire(probability, rng.gen::<f64>()) {
            self.spike_count += 1;
            self.potential = 0.0;
            probability
        } else {
            0.0
        }
    }
}

#[inline]
#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Spike decision for a uniform draw in `[0, 1)`.
#[inline]
#[must_use]
pub fn should_fire(probability: f64, draw: f64) -> bool {
    draw < probability
}
