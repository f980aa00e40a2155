pub mod bounds;
pub mod point;
pub mod vec;

pub use bounds::Bounds;
pub use point::Point;
pub use vec::Vector;

/// Tolerance used for approximate equality, segmentation termination and
/// chunk-boundary detection. Exact floating-point comparisons drift; keep
/// every threshold on this one constant.
pub const EPSILON: f64 = 1e-6;

pub fn almost_equals(a: f64, b: f64) -> bool {
    almost_equals_within(a, b, EPSILON)
}

pub fn almost_equals_within(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Linearly remaps `value` from the `[min_in, max_in]` range to the
/// `[min_out, max_out]` range. Does not clamp.
pub fn lerp(value: f64, min_in: f64, max_in: f64, min_out: f64, max_out: f64) -> f64 {
    let progress = (value - min_in) / (max_in - min_in);
    min_out + progress * (max_out - min_out)
}

/// Sign of `x` that treats zero as zero, unlike `f64::signum`.
pub(crate) fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Finds the index `i` such that `data[i] <= target < data[i + 1]` in a
/// sorted slice, or `data.len() - 2` when `target` is at or past the final
/// entry. `data` must hold at least two values.
pub fn binary_search(data: &[f64], target: f64) -> usize {
    search_between(data, target, 0, data.len() - 1)
}

fn search_between(data: &[f64], target: f64, low: usize, high: usize) -> usize {
    if high - low == 1 {
        return low;
    }

    let mid = (low + high) / 2;
    if data[mid] <= target {
        search_between(data, target, mid, high)
    } else {
        search_between(data, target, low, mid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_remaps_between_ranges() {
        assert!(almost_equals(lerp(5.0, 0.0, 10.0, 0.0, 1.0), 0.5));
        assert!(almost_equals(lerp(2.0, 2.0, 4.0, -1.0, 1.0), -1.0));
        assert!(almost_equals(lerp(3.5, 2.0, 4.0, -1.0, 1.0), 0.5));
        // not clamped
        assert!(almost_equals(lerp(6.0, 2.0, 4.0, 0.0, 1.0), 2.0));
    }

    #[test]
    fn binary_search_finds_the_containing_interval() {
        let times = [0.0, 1.0, 2.5, 2.75, 10.0];
        assert_eq!(binary_search(&times, 0.0), 0);
        assert_eq!(binary_search(&times, 0.5), 0);
        assert_eq!(binary_search(&times, 1.0), 1);
        assert_eq!(binary_search(&times, 2.6), 2);
        assert_eq!(binary_search(&times, 9.99), 3);
        // a query on the final entry maps into the last interval
        assert_eq!(binary_search(&times, 10.0), 3);
    }

    #[test]
    fn binary_search_satisfies_the_index_law() {
        let data: Vec<f64> = (0..57).map(|i| (i as f64).sqrt() * 1.7).collect();
        for target in data.windows(2).flat_map(|w| [w[0], 0.5 * (w[0] + w[1])]) {
            let i = binary_search(&data, target);
            assert!(data[i] <= target);
            assert!(target < data[i + 1] || i == data.len() - 2);
        }
    }
}
