//! Hysteresis binarization
//!
//! A plain zero-crossing slicer would chatter on every noise excursion near
//! the baseline. The Schmitt trigger holds its state inside the band
//! `[-h, h]`: only a swing past the far band edge flips the output.

/// Thresholder output levels
pub const HIGH: i8 = 1;
pub const LOW: i8 = -1;

/// Binarize a normalized signal. Values above `hysteresis` drive the
/// output HIGH, values below `-hysteresis` drive it LOW, values inside the
/// band hold the previous state. The initial state is LOW, so the output
/// is always exactly +1 or -1.
pub fn threshold(signal: &[f64], hysteresis: f64) -> Vec<i8> {
    let mut state = LOW;
    signal
        .iter()
        .map(|&value| {
            if value > hysteresis {
                state = HIGH;
            } else if value < -hysteresis {
                state = LOW;
            }
            state
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_wave_reproduced() {
        // Clean bipolar swing well outside the band
        let signal = vec![-0.45, -0.45, 0.45, 0.45, -0.45];
        assert_eq!(threshold(&signal, 0.1), vec![LOW, LOW, HIGH, HIGH, LOW]);
    }

    #[test]
    fn test_band_holds_state() {
        // In-band samples keep the last committed state
        let signal = vec![0.5, 0.05, -0.05, 0.09, -0.5, 0.0, 0.05];
        assert_eq!(
            threshold(&signal, 0.1),
            vec![HIGH, HIGH, HIGH, HIGH, LOW, LOW, LOW]
        );
    }

    #[test]
    fn test_initial_state_is_low() {
        let signal = vec![0.0, 0.05, -0.02];
        assert_eq!(threshold(&signal, 0.1), vec![LOW, LOW, LOW]);
    }

    #[test]
    fn test_output_is_always_binary() {
        // Pseudo-noise input: output must be +1/-1 only, never 0
        let signal: Vec<f64> = (0..1000)
            .map(|i| ((i * 2654435761_u64 as usize) % 2001) as f64 / 1000.0 - 1.0)
            .collect();
        for h in [0.01, 0.1, 0.5, 0.99] {
            assert!(threshold(&signal, h).iter().all(|&v| v == HIGH || v == LOW));
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(threshold(&[], 0.1).is_empty());
    }
}
