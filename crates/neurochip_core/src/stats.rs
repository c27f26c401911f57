//! Read-only population scans over every synapse on the chip.
//!
//! Partial sums are taken per neuron (in parallel when enabled) and then
//! folded in neuron order, so the parallel and sequential scans agree bit
//! for bit.

use neurochip_data::Neuron;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Resistance distribution over all synapses.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResistanceSummary {
    pub synapses: usize,
    pub degraded: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl ResistanceSummary {
    /// Coefficient of variation in percent.
    #[must_use]
    pub fn variability_percent(&self) -> f64 {
        if self.mean > 0.0 {
            self.std_dev / self.mean * 100.0
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn degraded_percent(&self) -> f64 {
        if self.synapses > 0 {
            self.degraded as f64 / self.synapses as f64 * 100.0
        } else {
            0.0
        }
    }
}

#[cfg_attr(not(feature = "parallel"), allow(unused_variables))]
fn per_neuron<T, F>(layers: &[Vec<Neuron>], parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&Neuron) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return layers
                .par_iter()
                .flat_map(|layer| layer.par_iter().map(&f))
                .collect();
        }
    }
    layers.iter().flatten().map(f).collect()
}

/// Two-pass mean / standard deviation of every synapse resistance.
#[must_use]
pub fn summarize(layers: &[Vec<Neuron>], parallel: bool) -> ResistanceSummary {
    let partials = per_neuron(layers, parallel, |n| {
        let sum: f64 = n.synapses.iter().map(|s| s.resistance).sum();
        (sum, n.synapses.len(), n.degraded_count())
    });

    let (sum, synapses, degraded) = partials
        .iter()
        .fold((0.0, 0usize, 0usize), |(s, c, d), &(ps, pc, pd)| {
            (s + ps, c + pc, d + pd)
        });
    if synapses == 0 {
        return ResistanceSummary::default();
    }
    let mean = sum / synapses as f64;

    let squares = per_neuron(layers, parallel, |n| {
        n.synapses
            .iter()
            .map(|s| (s.resistance - mean).powi(2))
            .sum::<f64>()
    });
    let variance = squares.iter().sum::<f64>() / synapses as f64;

    ResistanceSummary {
        synapses,
        degraded,
        mean,
        std_dev: variance.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurochip_data::Memristor;
    use std::collections::VecDeque;

    fn neuron(resistances: &[f64], degraded: usize) -> Neuron {
        Neuron {
            id: 0,
            layer: 0,
            synapses: resistances
                .iter()
                .enumerate()
                .map(|(i, &r)| Memristor {
                    resistance: r,
                    cycles: 0,
                    degraded: i < degraded,
                    history: VecDeque::new(),
                })
                .collect(),
            threshold: 0.5,
            potential: 0.0,
            spike_count: 0,
        }
    }

    #[test]
    fn test_summary_known_values() {
        let layers = vec![
            vec![neuron(&[2.0, 4.0], 0)],
            vec![neuron(&[4.0, 4.0], 1), neuron(&[5.0, 5.0, 7.0, 9.0], 0)],
        ];
        let s = summarize(&layers, false);
        assert_eq!(s.synapses, 8);
        assert_eq!(s.degraded, 1);
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.std_dev, 2.0);
        assert!((s.variability_percent() - 40.0).abs() < 1e-12);
        assert_eq!(s.degraded_percent(), 12.5);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let layers: Vec<Vec<Neuron>> = (0..4)
            .map(|l| {
                (0..50)
                    .map(|n| {
                        let rs: Vec<f64> = (0..10)
                            .map(|s| 1e4 + (l * 977 + n * 131 + s * 17) as f64 * 3.3)
                            .collect();
                        neuron(&rs, n % 3)
                    })
                    .collect()
            })
            .collect();
        assert_eq!(summarize(&layers, true), summarize(&layers, false));
    }

    #[test]
    fn test_empty_population() {
        let s = summarize(&[], false);
        assert_eq!(s.synapses, 0);
        assert_eq!(s.variability_percent(), 0.0);
        assert_eq!(s.degraded_percent(), 0.0);
    }

    proptest::proptest! {
        #[test]
        fn prop_parallel_scan_is_bit_identical(
            rs in proptest::collection::vec(1e4f64..1e6, 1..400),
            width in 1usize..40,
        ) {
            let layers: Vec<Vec<Neuron>> = rs
                .chunks(width)
                .map(|chunk| chunk.chunks(7).map(|c| neuron(c, 0)).collect())
                .collect();
            let seq = summarize(&layers, false);
            let par = summarize(&layers, true);
            proptest::prop_assert_eq!(seq.mean.to_bits(), par.mean.to_bits());
            proptest::prop_assert_eq!(seq.std_dev.to_bits(), par.std_dev.to_bits());
            proptest::prop_assert_eq!(seq.synapses, rs.len());
        }
    }
}
