//! Baseline removal and amplitude scaling
//!
//! Bandwidth traces ride on a large DC offset (the uncontended throughput
//! of the shared resource), with the modulation as a small swing around it.
//! Subtracting a baseline centers the swing on zero; dividing by the raw
//! trace's peak bounds the result to [-1, 1] so the hysteresis band has a
//! fixed meaning across machines.

use super::DemodError;

/// Normalize the trace. `window == 0` subtracts the global mean; a
/// positive `window` subtracts a centered rolling average instead, which
/// tracks slow baseline drift. Both modes scale by the peak absolute value
/// of the raw trace and fail with `DegenerateSignal` when that peak is 0.
pub fn normalize(raw: &[f64], window: usize) -> Result<Vec<f64>, DemodError> {
    let peak = raw.iter().fold(0.0f64, |max, v| max.max(v.abs()));
    if peak == 0.0 {
        return Err(DemodError::DegenerateSignal);
    }

    let normalized = if window == 0 {
        let mean = raw.iter().sum::<f64>() / raw.len() as f64;
        raw.iter().map(|v| (v - mean) / peak).collect()
    } else {
        let baseline = rolling_mean(raw, window);
        raw.iter()
            .zip(&baseline)
            .map(|(v, b)| (v - b) / peak)
            .collect()
    };

    Ok(normalized)
}

/// Centered length-preserving moving average with zero padding beyond the
/// trace ends. For window `w` the span at index `i` is
/// `[i - w/2, i + (w - 1)/2]`; the divisor stays `w` even where the span is
/// clipped, matching a same-length convolution against a box kernel.
fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let mut prefix = vec![0.0f64; values.len() + 1];
    for (i, v) in values.iter().enumerate() {
        prefix[i + 1] = prefix[i] + v;
    }

    let lo_offset = window / 2;
    let hi_offset = (window - 1) / 2;

    (0..values.len())
        .map(|i| {
            let lo = i.saturating_sub(lo_offset);
            let hi = (i + hi_offset).min(values.len() - 1);
            (prefix[hi + 1] - prefix[lo]) / window as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_mode_centers_and_scales() {
        let raw = vec![10.0, 100.0, 10.0, 100.0];
        let normalized = normalize(&raw, 0).unwrap();

        // Mean 55, peak 100
        assert!((normalized[0] + 0.45).abs() < 1e-12);
        assert!((normalized[1] - 0.45).abs() < 1e-12);

        let sum: f64 = normalized.iter().sum();
        assert!(sum.abs() < 1e-12);
    }

    #[test]
    fn test_rolling_mean_matches_same_convolution() {
        // Hand-computed same-length box convolution of [1, 2, 3, 4]
        let values = vec![1.0, 2.0, 3.0, 4.0];

        let w2 = rolling_mean(&values, 2);
        for (got, want) in w2.iter().zip([0.5, 1.5, 2.5, 3.5]) {
            assert!((got - want).abs() < 1e-12);
        }

        let w3 = rolling_mean(&values, 3);
        for (got, want) in w3.iter().zip([1.0, 2.0, 3.0, 7.0 / 3.0]) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rolling_mode_scales_by_raw_peak() {
        let raw = vec![4.0, 8.0, 4.0, 8.0];
        let normalized = normalize(&raw, 2).unwrap();

        // Baseline [2, 6, 6, 6], peak 8
        let want = [(4.0 - 2.0) / 8.0, (8.0 - 6.0) / 8.0, -0.25, 0.25];
        for (got, want) in normalized.iter().zip(want) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_amplitude_is_degenerate() {
        let raw = vec![0.0; 16];
        assert_eq!(normalize(&raw, 0), Err(DemodError::DegenerateSignal));
        assert_eq!(normalize(&raw, 4), Err(DemodError::DegenerateSignal));
        assert_eq!(normalize(&[], 0), Err(DemodError::DegenerateSignal));
    }
}
