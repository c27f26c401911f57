//! Resistance programming.
//!
//! Weights in `[0, 1]` map linearly onto the operating window, strong
//! weights meaning low resistance. A cell is walked toward its target with
//! fixed-amplitude SET/RESET pulses, one multiplicative step at a time.
//! Every loop is capped by `programming.max_pulses`: with 3% steps and a 1%
//! tolerance some targets can only be bracketed, never hit.

use crate::config::{ChipConfig, MaterialConfig};
use crate::memristor::{MemristorLogic, PulseOutcome};
use neurochip_data::{Memristor, Pulse};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Result of driving one cell toward a target resistance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgramOutcome {
    /// Electrical pulses actually applied.
    pub pulses: usize,
    pub final_resistance: f64,
    pub converged: bool,
    /// The cell wore out while being programmed.
    pub degraded: bool,
}

/// Resistance that encodes `weight` (clamped to `[0, 1]`).
#[must_use]
pub fn weight_to_resistance(weight: f64, material: &MaterialConfig) -> f64 {
    let w = weight.clamp(0.0, 1.0);
    material.resistance_min + (material.resistance_max - material.resistance_min) * (1.0 - w)
}

/// Inverse of [`weight_to_resistance`] for in-range resistances.
#[must_use]
pub fn resistance_to_weight(resistance: f64, material: &MaterialConfig) -> f64 {
    let span = material.resistance_max - material.resistance_min;
    if span <= 0.0 {
        return 1.0;
    }
    (1.0 - (resistance - material.resistance_min) / span).clamp(0.0, 1.0)
}

fn within_tolerance(resistance: f64, target: f64, tolerance: f64) -> bool {
    (resistance - target).abs() <= tolerance * target
}

/// Open-loop pulse plan from an assumed `start` resistance to `target`.
///
/// Models each step with the configured SET/RESET factors and clipping but
/// without wear-out.
#[must_use]
pub fn plan_pulse_train(start: f64, target: f64, config: &ChipConfig) -> Vec<Pulse> {
    let p = &config.programming;
    let d = &config.device;
    let m = &config.material;

    let mut pulses = Vec::new();
    let mut r = start;
    while !within_tolerance(r, target, p.tolerance) && pulses.len() < p.max_pulses {
        if r > target {
            pulses.push(Pulse::set(p.set_voltage, p.pulse_duration));
            r *= d.set_factor;
        } else {
            pulses.push(Pulse::reset(p.reset_voltage, p.pulse_duration));
            r *= d.reset_factor;
        }
        r = r.clamp(m.resistance_min, m.resistance_max);
    }
    pulses
}

/// Closed-loop programming: pulse, re-read, repeat.
///
/// A non-finite or non-positive target leaves the cell untouched.
pub fn program_to_target<R: Rng>(
    cell: &mut Memristor,
    target: f64,
    config: &ChipConfig,
    rng: &mut R,
) -> ProgramOutcome {
    let p = &config.programming;
    let mut pulses = 0;

    if !(target.is_finite() && target > 0.0) {
        tracing::warn!(target_ohms = target, "Unusable programming target");
        return ProgramOutcome {
            pulses,
            final_resistance: cell.resistance,
            converged: false,
            degraded: cell.degraded,
        };
    }

    while !cell.degraded
        && !within_tolerance(cell.resistance, target, p.tolerance)
        && pulses < p.max_pulses
    {
        let voltage = if cell.resistance > target {
            p.set_voltage
        } else {
            p.reset_voltage
        };
        if cell.pulse(voltage, config, rng) == PulseOutcome::Ignored {
            break;
        }
        pulses += 1;
    }

    let converged = within_tolerance(cell.resistance, target, p.tolerance);
    if !converged {
        tracing::warn!(
            target_ohms = target,
            resistance = cell.resistance,
            pulses,
            degraded = cell.degraded,
            "Programming did not converge"
        );
    }

    ProgramOutcome {
        pulses,
        final_resistance: cell.resistance,
        converged,
        degraded: cell.degraded,
    }
}
