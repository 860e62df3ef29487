//! Empty-safe descriptive statistics over `f64` samples.

use std::cmp::Ordering;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median with the midpoint of the two central values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted_ascending(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().min_by(|a, b| a.total_cmp(b))
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().max_by(|a, b| a.total_cmp(b))
}

/// Lower and upper quartile using the exclusive method.
///
/// Positions are taken over `n + 1` slots with the interpolation window
/// clamped to the sample, so very small samples extrapolate past their
/// extremes. A single value is its own quartiles.
pub fn quartiles(values: &[f64]) -> Option<(f64, f64)> {
    match values.len() {
        0 => None,
        1 => Some((values[0], values[0])),
        len => {
            let sorted = sorted_ascending(values);
            let cut = |i: usize| -> f64 {
                let m = len + 1;
                let j = (i * m / 4).clamp(1, len - 1);
                let delta = (i * m) as f64 - (j * 4) as f64;
                (sorted[j - 1] * (4.0 - delta) + sorted[j] * delta) / 4.0
            };
            Some((cut(1), cut(3)))
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn sorted_ascending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_samples_have_no_statistics() {
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[]), None);
        assert_eq!(quartiles(&[]), None);
    }

    #[test]
    fn median_averages_middle_pair() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
    }

    #[test]
    fn quartiles_use_exclusive_positions() {
        let (q1, q3) = quartiles(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
        assert!((q1 - 2.0).abs() < 1e-9);
        assert!((q3 - 6.0).abs() < 1e-9);

        let (q1, q3) = quartiles(&[10.0, 20.0]).unwrap();
        assert!((q1 - 7.5).abs() < 1e-9);
        assert!((q3 - 22.5).abs() < 1e-9);

        assert_eq!(quartiles(&[5.0]), Some((5.0, 5.0)));
    }

    #[test]
    fn round2_keeps_two_decimals() {
        assert!((round2(66.666_666) - 66.67).abs() < 1e-9);
        assert!((round2(0.004) - 0.0).abs() < 1e-9);
    }
}
