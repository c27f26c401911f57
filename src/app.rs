//! Headless runner: build a chip, drive random stimuli, report statistics.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use crate::model::chip::NeuromorphicChip;
use crate::model::config::ChipConfig;
use crate::model::state::ChipStats;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Outcome of one headless run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub stimuli: u64,
    pub spikes: u64,
    /// Mean wall-clock latency per stimulus, microseconds. Zero unless measured.
    pub mean_latency_us: f64,
    /// Wall-clock seconds since the chip was fabricated.
    pub wall_time_s: f64,
    pub fingerprint: String,
    pub stats: ChipStats,
}

pub struct App {
    pub chip: NeuromorphicChip,
}

impl App {
    pub fn new(config: ChipConfig) -> Result<Self> {
        let chip = NeuromorphicChip::new(config).context("building chip")?;
        Ok(Self { chip })
    }

    /// Loads `path`, or `config.toml` if present, or the defaults.
    ///
    /// An explicitly named file must exist.
    pub fn load_config(path: Option<&Path>) -> Result<ChipConfig> {
        match path {
            Some(p) => ChipConfig::load(p).with_context(|| format!("loading {}", p.display())),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => ChipConfig::load(DEFAULT_CONFIG_PATH)
                .with_context(|| format!("loading {DEFAULT_CONFIG_PATH}")),
            None => Ok(ChipConfig::default()),
        }
    }

    /// Drives `steps` random stimuli and collects statistics.
    pub fn run(&mut self, steps: u64) -> RunReport {
        let spikes_before = self.chip.metrics().spike_count();
        let mut latency = Duration::ZERO;
        for _ in 0..steps {
            latency += self.chip.drive_random_stimulus();
        }
        let mean_latency_us = if steps > 0 {
            latency.as_secs_f64() * 1e6 / steps as f64
        } else {
            0.0
        };

        tracing::info!(steps, "Run complete");

        RunReport {
            stimuli: steps,
            spikes: self.chip.metrics().spike_count() - spikes_before,
            mean_latency_us,
            wall_time_s: self.chip.metrics().elapsed().as_secs_f64(),
            fingerprint: self.chip.config().fingerprint(),
            stats: self.chip.stats(),
        }
    }
}

/// Human-readable summary.
#[must_use]
pub fn render_report(report: &RunReport) -> String {
    let s = &report.stats;
    let mut out = String::new();
    let _ = writeln!(out, "Chip statistics:");
    let _ = writeln!(out, "  Neurons: {}", s.neurons);
    let _ = writeln!(out, "  Synapses: {}", s.synapses);
    let _ = writeln!(out, "  Stimuli: {} ({} spikes)", report.stimuli, report.spikes);
    let _ = writeln!(out, "  Power: {:.2} mW", s.power_w * 1000.0);
    let _ = writeln!(out, "  Temperature: {:.1}°C", s.temperature_c);
    let _ = writeln!(
        out,
        "  Mean resistance: {:.1} kΩ (σ {:.1} kΩ)",
        s.mean_resistance / 1e3,
        s.std_resistance / 1e3
    );
    let _ = writeln!(out, "  Memristor variability: {:.2}%", s.variability_percent);
    let _ = writeln!(out, "  Degraded: {:.4}%", s.degraded_percent);
    let _ = writeln!(out, "  Wall time: {:.3} s", report.wall_time_s);
    if report.mean_latency_us > 0.0 {
        let _ = writeln!(out, "  Mean latency: {:.3} µs", report.mean_latency_us);
    }
    out
}
