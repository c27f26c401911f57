pub mod macros;

use neurochip_lib::model::chip::NeuromorphicChip;
use neurochip_lib::model::config::ChipConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Small, seeded chips for integration tests.
#[allow(dead_code)]
pub struct ChipBuilder {
    config: ChipConfig,
    seed: u64,
}

#[allow(dead_code)]
impl ChipBuilder {
    pub fn new() -> Self {
        let mut config = ChipConfig::default();
        config.topology.num_layers = 2;
        config.topology.neurons_per_layer = 20;
        config.topology.synapses_per_neuron = 16;
        Self { config, seed: 42 }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_topology(mut self, layers: usize, neurons: usize, synapses: usize) -> Self {
        self.config.topology.num_layers = layers;
        self.config.topology.neurons_per_layer = neurons;
        self.config.topology.synapses_per_neuron = synapses;
        self
    }

    /// Makes every neuron fire on every step.
    pub fn always_firing(mut self) -> Self {
        self.config.neuron.threshold_min = -1.0;
        self.config.neuron.threshold_max = -1.0;
        self.config.neuron.steepness = 1e6;
        self
    }

    pub fn with_config<F: FnOnce(&mut ChipConfig)>(mut self, f: F) -> Self {
        f(&mut self.config);
        self
    }

    pub fn config(&self) -> ChipConfig {
        self.config.clone()
    }

    pub fn build(self) -> NeuromorphicChip {
        NeuromorphicChip::with_rng(self.config, ChaCha8Rng::seed_from_u64(self.seed))
            .expect("test config should be valid")
    }
}
