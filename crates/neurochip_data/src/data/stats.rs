use serde::{Deserialize, Serialize};

/// Population-wide snapshot of the chip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChipStats {
    pub neurons: usize,
    pub synapses: usize,
    /// Ohms.
    pub mean_resistance: f64,
    /// Population standard deviation, ohms.
    pub std_resistance: f64,
    /// Coefficient of variation of resistance, percent.
    pub variability_percent: f64,
    pub degraded_percent: f64,
    /// Celsius.
    pub temperature_c: f64,
    /// Accumulated spike energy (reported as watts).
    pub power_w: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_json_field_names() {
        let stats = ChipStats {
            neurons: 10,
            synapses: 1000,
            ..Default::default()
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["neurons"], 10);
        assert_eq!(json["synapses"], 1000);
        assert!(json.get("temperature_c").is_some());
        assert!(json.get("power_w").is_some());
    }
}
