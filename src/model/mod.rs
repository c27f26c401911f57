pub use neurochip_core::{MemristorLogic, NeuronLogic};
pub mod chip {
    pub use neurochip_core::chip::*;
}
pub mod config {
    pub use neurochip_core::config::*;
}
pub mod error {
    pub use neurochip_core::error::*;
}
pub mod memristor {
    pub use neurochip_core::memristor::*;
}
pub mod neuron {
    pub use neurochip_core::neuron::*;
}
pub mod noise {
    pub use neurochip_core::noise::*;
}
pub mod programming {
    pub use neurochip_core::programming::*;
}
pub mod stats {
    pub use neurochip_core::stats::*;
}
pub mod metrics {
    pub use neurochip_core::metrics::*;
}

pub mod state {
    pub use neurochip_data::*;
}
