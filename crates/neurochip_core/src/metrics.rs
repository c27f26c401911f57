//! Run metrics for the chip.
//!
//! Counters and structured logging only; nothing here feeds back into the
//! physical model.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counters for a single chip instance.
#[derive(Debug)]
pub struct Metrics {
    stimulus_count: AtomicU64,
    spike_count: AtomicU64,
    pulse_count: AtomicU64,
    degradation_count: AtomicU64,
    log_interval: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Metrics {
    /// Creates a collector that logs progress every `log_interval` stimuli.
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            stimulus_count: AtomicU64::new(0),
            spike_count: AtomicU64::new(0),
            pulse_count: AtomicU64::new(0),
            degradation_count: AtomicU64::new(0),
            log_interval: log_interval.max(1),
            start_time: Instant::now(),
        }
    }

    /// Records one random stimulus and whether it produced a spike.
    pub fn record_stimulus(&self, latency: Duration, fired: bool, power_w: f64) {
        let stimuli = self.stimulus_count.fetch_add(1, Ordering::Relaxed) + 1;
        let spikes = if fired {
            self.spike_count.fetch_add(1, Ordering::Relaxed) + 1
        } else {
            self.spike_count.load(Ordering::Relaxed)
        };

        if stimuli.is_multiple_of(self.log_interval) {
            tracing::info!(
                stimuli = stimuli,
                spikes = spikes,
                power_w = power_w,
                latency_us = latency.as_micros() as u64,
                "Stimulus progress"
            );
        }
    }

    /// Records one addressed pulse.
    pub fn record_pulse(&self) {
        self.pulse_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a cell wearing out.
    pub fn record_degradation(&self, location: &str, cycles: u64) {
        self.degradation_count.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(synapse = location, cycles = cycles, "Memristor degraded");
    }

    #[must_use]
    pub fn stimulus_count(&self) -> u64 {
        self.stimulus_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn spike_count(&self) -> u64 {
        self.spike_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn pulse_count(&self) -> u64 {
        self.pulse_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn degradation_count(&self) -> u64 {
        self.degradation_count.load(Ordering::Relaxed)
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
