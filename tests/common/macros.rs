/// Asserts that two floats agree within an absolute tolerance.
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r): (f64, f64) = ($left, $right);
        assert!(
            (l - r).abs() <= $tol,
            "{} and {} differ by more than {}",
            l,
            r,
            $tol
        );
    };
}

/// Asserts that every synapse resistance on the chip lies in `[lo, hi]`.
#[macro_export]
macro_rules! assert_resistances_within {
    ($chip:expr, $lo:expr, $hi:expr) => {
        for neuron in $chip.layers().iter().flatten() {
            for syn in &neuron.synapses {
                assert!(
                    syn.resistance >= $lo && syn.resistance <= $hi,
                    "Neuron {} has resistance {} outside [{}, {}]",
                    neuron.id,
                    syn.resistance,
                    $lo,
                    $hi
                );
            }
        }
    };
}
