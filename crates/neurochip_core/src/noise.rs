//! Read-noise and tunneling estimates for a single cell.

use serde::{Deserialize, Serialize};

/// Boltzmann constant, J/K.
pub const BOLTZMANN: f64 = 1.380_649e-23;
/// Elementary charge, C.
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;
/// Reduced Planck constant, J·s.
pub const HBAR: f64 = 1.054_571_817e-34;
/// Electron rest mass, kg.
pub const ELECTRON_MASS: f64 = 9.109_383_701_5e-31;

/// Johnson–Nyquist RMS noise voltage `sqrt(4 k T R Δf)`.
#[must_use]
pub fn thermal_noise(resistance: f64, bandwidth_hz: f64, temperature_k: f64) -> f64 {
    (4.0 * BOLTZMANN * temperature_k * resistance * bandwidth_hz).sqrt()
}

/// Shot-noise RMS current `sqrt(2 q I Δf)`.
#[must_use]
pub fn shot_noise(current: f64, bandwidth_hz: f64) -> f64 {
    (2.0 * ELEMENTARY_CHARGE * current.abs() * bandwidth_hz).sqrt()
}

/// Transmission through a rectangular barrier in the WKB limit.
///
/// Electrons at or above the barrier height pass with probability one.
#[must_use]
pub fn tunneling_probability(barrier_ev: f64, width_nm: f64, energy_ev: f64) -> f64 {
    if energy_ev >= barrier_ev {
        return 1.0;
    }
    let gap = (barrier_ev - energy_ev) * ELEMENTARY_CHARGE;
    let kappa = (2.0 * ELECTRON_MASS * gap).sqrt() / HBAR;
    (-2.0 * kappa * width_nm * 1e-9).exp()
}

/// Noise figures for one read of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseFigure {
    /// RMS thermal noise, volts.
    pub thermal_v: f64,
    /// RMS shot noise, amperes.
    pub shot_a: f64,
    /// Signal current of the read, amperes.
    pub signal_a: f64,
}

impl NoiseFigure {
    /// Signal-to-shot-noise ratio. Zero when there is no signal.
    #[must_use]
    pub fn snr(&self) -> f64 {
        if self.shot_a > 0.0 {
            self.signal_a / self.shot_a
        } else {
            0.0
        }
    }
}
