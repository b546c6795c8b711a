// Shared decay and precision helpers for the strain evaluator

/// Exponentially decay `value` over `elapsed_ms` milliseconds.
///
/// `decay_base` is the retention factor per 1000 ms: after exactly one
/// second, `value * decay_base` remains. Zero elapsed time leaves the value
/// unchanged (`decay_base^0 == 1`).
pub fn apply_decay(value: f64, elapsed_ms: f64, decay_base: f64) -> f64 {
    value * decay_base.powf(elapsed_ms / 1000.0)
}

/// Whether `a` exceeds `b` by more than `tolerance`.
///
/// The hold-overlap scan compares end times at 1 ms precision so that
/// nominally simultaneous releases do not register as overlaps.
pub(crate) fn definitely_bigger(a: f64, b: f64, tolerance: f64) -> bool {
    a - b > tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_elapsed_is_identity() {
        assert_eq!(apply_decay(3.5, 0.0, 0.125), 3.5);
        assert_eq!(apply_decay(0.0, 0.0, 0.30), 0.0);
    }

    #[test]
    fn test_one_second_applies_base_once() {
        let decayed = apply_decay(4.0, 1000.0, 0.125);
        assert!((decayed - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_decay_never_increases() {
        let mut prev = 2.0;
        for elapsed in [1.0, 10.0, 100.0, 1000.0, 10000.0] {
            let decayed = apply_decay(2.0, elapsed, 0.30);
            assert!(decayed <= prev);
            assert!(decayed >= 0.0);
            prev = decayed;
        }
    }

    #[test]
    fn test_definitely_bigger() {
        assert!(definitely_bigger(102.0, 100.0, 1.0));
        assert!(!definitely_bigger(101.0, 100.0, 1.0));
        assert!(!definitely_bigger(100.0, 100.0, 1.0));
        assert!(!definitely_bigger(99.0, 100.0, 1.0));
    }
}
