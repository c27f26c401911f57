mod common;

use common::ChipBuilder;
use neurochip_lib::model::config::ChipConfig;
use neurochip_lib::model::memristor::PulseOutcome;
use neurochip_lib::model::state::{Pulse, SynapseAddr};
use neurochip_lib::model::MemristorLogic;

#[test]
fn test_default_topology_counts() {
    let config = ChipConfig::default();
    assert_eq!(config.total_neurons(), 8 * 1250);
    assert_eq!(
        config.total_neurons() * config.topology.synapses_per_neuron,
        1_000_000
    );
}

#[test]
fn test_chip_counts_match_topology() {
    let chip = ChipBuilder::new().with_topology(3, 7, 11).build();
    assert_eq!(chip.total_neurons(), 21);
    assert_eq!(chip.total_synapses(), 231);
    assert_eq!(chip.layers().len(), 3);
    assert!(chip.layers().iter().all(|l| l.len() == 7));
}

#[test]
fn test_fabricated_resistances_within_widened_window() {
    let chip = ChipBuilder::new().with_seed(7).build();
    assert_resistances_within!(chip, 10e3 * 0.9, 1e6 * 1.1);
}

#[test]
fn test_power_is_non_decreasing() {
    let mut chip = ChipBuilder::new().with_seed(11).build();
    let mut last = chip.power_draw();
    for _ in 0..2000 {
        chip.drive_random_stimulus();
        assert!(chip.power_draw() >= last);
        last = chip.power_draw();
    }
}

#[test]
fn test_power_tracks_spike_count() {
    let mut chip = ChipBuilder::new().with_seed(13).always_firing().build();
    for _ in 0..25 {
        chip.drive_random_stimulus();
    }
    assert_eq!(chip.metrics().spike_count(), 25);
    assert_close!(chip.power_draw(), 25.0 * 1e-11, 1e-22);
}

#[test]
fn test_potential_resets_after_spike() {
    let mut chip = ChipBuilder::new().with_seed(17).always_firing().build();
    let inputs = vec![0.5; 16];
    for index in 0..20 {
        let spike = chip.process(1, index, &inputs).unwrap();
        assert!(spike > 0.0);
        let neuron = chip.neuron(1, index).unwrap();
        assert_eq!(neuron.potential, 0.0);
        assert_eq!(neuron.spike_count, 1);
    }
}

#[test]
fn test_silent_step_follows_leaky_integration() {
    let mut chip = ChipBuilder::new()
        .with_seed(19)
        .with_config(|c| {
            c.neuron.threshold_min = 1e9;
            c.neuron.threshold_max = 1e9;
        })
        .build();
    let inputs = vec![0.3; 16];
    let current: f64 = chip
        .neuron(0, 0)
        .unwrap()
        .synapses
        .iter()
        .map(|s| 0.3 / s.resistance)
        .sum();

    assert_eq!(chip.process(0, 0, &inputs).unwrap(), 0.0);
    let first = chip.neuron(0, 0).unwrap().potential;
    assert_close!(first, 0.1 * current, 1e-15);

    chip.process(0, 0, &inputs).unwrap();
    let second = chip.neuron(0, 0).unwrap().potential;
    assert_close!(second, 0.9 * first + 0.1 * current, 1e-15);
}

#[test]
fn test_short_input_vector_uses_prefix() {
    let mut chip = ChipBuilder::new()
        .with_seed(23)
        .with_config(|c| {
            c.neuron.threshold_min = 1e9;
            c.neuron.threshold_max = 1e9;
        })
        .build();
    let r0 = chip.neuron(0, 2).unwrap().synapses[0].resistance;
    chip.process(0, 2, &[0.4]).unwrap();
    assert_close!(chip.neuron(0, 2).unwrap().potential, 0.1 * 0.4 / r0, 1e-15);
}

#[test]
fn test_five_set_pulses() {
    let mut chip = ChipBuilder::new().with_seed(29).build();
    let addr = SynapseAddr::new(0, 0, 0);
    let start = chip.synapse(addr).unwrap().resistance;
    for _ in 0..5 {
        assert_eq!(chip.apply_pulse(addr, 1.5).unwrap(), PulseOutcome::Applied);
    }
    let cell = chip.synapse(addr).unwrap();
    assert_eq!(cell.cycles, 5);
    assert_close!(cell.resistance, start * 0.97f64.powi(5), 1e-6);
    // Fabrication noise is ~4.6% around 100 kΩ
    assert!((cell.resistance - 85_873.0).abs() < 0.25 * 85_873.0);
}

#[test]
fn test_degraded_cell_is_frozen() {
    let mut chip = ChipBuilder::new()
        .with_seed(31)
        .with_config(|c| {
            c.device.endurance_cycles = 0;
            c.device.failure_probability = 1.0;
        })
        .build();
    let addr = SynapseAddr::new(1, 4, 9);

    assert_eq!(chip.apply_pulse(addr, 1.5).unwrap(), PulseOutcome::Failed);
    assert_eq!(chip.metrics().degradation_count(), 1);
    let frozen = chip.synapse(addr).unwrap().clone();
    assert!(frozen.degraded);

    for v in [1.5, -1.5, 0.1, 3.0] {
        assert_eq!(chip.apply_pulse(addr, v).unwrap(), PulseOutcome::Ignored);
        assert_eq!(chip.read_synapse(addr, Some(v)).unwrap(), 0.0);
    }
    let train = [Pulse::set(1.5, 10e-9), Pulse::reset(-1.5, 10e-9)];
    let report = chip.apply_pulse_train(addr, &train).unwrap();
    assert_eq!(report.applied, 0);
    assert_eq!(chip.synapse(addr).unwrap(), &frozen);
    assert_eq!(chip.synapse(addr).unwrap().read(0.2), 0.0);
    assert_eq!(chip.metrics().degradation_count(), 1);
}

#[test]
fn test_degraded_cell_still_conducts_during_integration() {
    let mut chip = ChipBuilder::new()
        .with_seed(37)
        .with_config(|c| {
            c.device.endurance_cycles = 0;
            c.device.failure_probability = 1.0;
            c.neuron.threshold_min = 1e9;
            c.neuron.threshold_max = 1e9;
        })
        .build();
    let addr = SynapseAddr::new(0, 3, 0);
    chip.apply_pulse(addr, 1.5).unwrap();
    let r = chip.synapse(addr).unwrap().resistance;

    chip.process(0, 3, &[0.5]).unwrap();
    assert_close!(chip.neuron(0, 3).unwrap().potential, 0.1 * 0.5 / r, 1e-15);
}

#[test]
fn test_fresh_chip_statistics() {
    let mut chip = ChipBuilder::new()
        .with_seed(41)
        .with_topology(4, 250, 100)
        .build();
    let stats = chip.stats();
    assert_eq!(stats.neurons, 1000);
    assert_eq!(stats.synapses, 100_000);
    assert_eq!(stats.degraded_percent, 0.0);
    assert_eq!(stats.power_w, 0.0);
    assert_eq!(stats.temperature_c, 27.0);
    // Log-normal with σ = 0.02 decades has a CV of ~4.6%
    assert!(
        stats.variability_percent > 4.3 && stats.variability_percent < 4.9,
        "variability {}",
        stats.variability_percent
    );
    assert!((stats.mean_resistance - 100e3).abs() < 1e3);
}

#[test]
fn test_temperature_rises_with_power() {
    let mut chip = ChipBuilder::new()
        .with_seed(43)
        .always_firing()
        .with_config(|c| c.thermal.thermal_resistance = 1e9)
        .build();
    for _ in 0..100 {
        chip.drive_random_stimulus();
    }
    let stats = chip.stats();
    // 100 spikes × 1e-11 J × 1e9 K/W
    assert_close!(stats.temperature_c, 27.0 + 1.0, 1e-9);
    assert_close!(chip.temperature(), 301.0, 1e-9);
}
