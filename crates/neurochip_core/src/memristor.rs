//! HfO₂ memristor update rules.
//!
//! Fabrication spread is log-normal: the initial resistance is sampled in
//! log10 space around the target and clipped to a slightly widened operating
//! window. After that every pulse is a deterministic multiplicative step,
//! except for the wear-out roll once a cell is past its endurance limit.

use crate::config::ChipConfig;
pub use neurochip_data::Memristor;
use rand::Rng;
use rand_distr::StandardNormal;
use std::collections::VecDeque;

/// Slack applied to the operating window at fabrication time.
pub const FABRICATION_LOW: f64 = 0.9;
pub const FABRICATION_HIGH: f64 = 1.1;

/// What a single pulse did to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseOutcome {
    /// The cell had already failed; nothing changed.
    Ignored,
    /// Cycle counted, resistance updated.
    Applied,
    /// Cycle counted and the cell failed permanently on this pulse.
    Failed,
}

pub trait MemristorLogic {
    /// Fabricates a cell around `target`.
    ///
    /// `None`, non-finite and non-positive targets all fall back to
    /// `material.target_resistance`.
    fn new_with_rng<R: Rng>(config: &ChipConfig, target: Option<f64>, rng: &mut R) -> Self;

    /// Applies one SET/RESET/sub-threshold pulse.
    fn pulse<R: Rng>(&mut self, voltage: f64, config: &ChipConfig, rng: &mut R) -> PulseOutcome;

    /// Non-destructive read current `V / R`. Zero once degraded.
    #[must_use]
    fn read(&self, voltage: f64) -> f64;
}

impl MemristorLogic for Memristor {
    fn new_with_rng<R: Rng>(config: &ChipConfig, target: Option<f64>, rng: &mut R) -> Self {
        let material = &config.material;
        let target = target
            .filter(|t| t.is_finite() && *t > 0.0)
            .unwrap_or(material.target_resistance);

        let log_std = material.variability / 2.0;
        let deviate: f64 = rng.sample(StandardNormal);
        let resistance = 10f64.powf(target.log10() + deviate * log_std).clamp(
            material.resistance_min * FABRICATION_LOW,
            material.resistance_max * FABRICATION_HIGH,
        );

        let mut history = VecDeque::new();
        if config.device.history_capacity > 0 {
            history.push_back(resistance);
        }

        Memristor {
            resistance,
            cycles: 0,
            degraded: false,
            history,
        }
    }

    fn pulse<R: Rng>(&mut self, voltage: f64, config: &ChipConfig, rng: &mut R) -> PulseOutcome {
        if self.degraded {
            return PulseOutcome::Ignored;
        }
        let device = &config.device;
        self.cycles += 1;

        if voltage > device.set_threshold {
            self.resistance *= device.set_factor;
        } else if voltage < device.reset_threshold {
            self.resistance *= device.reset_factor;
        }
        self.resistance = self.resistance.clamp(
            config.material.resistance_min,
            config.material.resistance_max,
        );

        let failed = self.cycles > device.endurance_cycles
            && rng.gen::<f64>() < device.failure_probability;
        if failed {
            self.degraded = true;
        }

        record_history(&mut self.history, self.resistance, device.history_capacity);

        if failed {
            PulseOutcome::Failed
        } else {
            PulseOutcome::Applied
        }
    }

    fn read(&self, voltage: f64) -> f64 {
        if self.degraded {
            return 0.0;
        }
        voltage / self.resistance
    }
}

fn record_history(history: &mut VecDeque<f64>, resistance: f64, capacity: usize) {
    if capacity == 0 {
        return;
    }
    while history.len() >= capacity {
        history.pop_front();
    }
    history.push_back(resistance);
}
