//! Bandwidth covert-channel demodulation
//!
//! The demodulator turns a uniform bandwidth trace into the transmitted
//! bitstream:
//! 1. Normalize (baseline removal, peak scaling)
//! 2. Hysteresis threshold to {+1, -1}
//! 3. Edge detection and burst merging
//! 4. Blind clock-period recovery from edge spacing
//! 5. Differential decode (0 = mid-period transition, 1 = none)
//! 6. Byte assembly
//!
//! Every stage is a pure function of its predecessor's complete output;
//! one run produces one immutable `Decoded` value.

mod bytes;
mod clock;
mod decode;
mod edges;
mod error;
mod normalize;
mod threshold;

pub use decode::BitRecord;
pub use error::DemodError;

use crate::config::DemodConfig;
use crate::trace::UniformTrace;
use serde::Serialize;
use tracing::debug;

/// Counters from one demodulation run
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct DemodStats {
    /// Threshold crossings before merging
    pub edges_detected: usize,
    /// Edges absorbed by the burst merge pass
    pub edges_merged: usize,
    /// Edges deleted by the decoder's corruption repair
    pub edges_discarded: usize,
    /// Bits recovered
    pub bits_decoded: usize,
}

/// Output of one demodulation run, including the intermediate products the
/// diagnostic record carries
#[derive(Debug, Clone)]
pub struct Decoded {
    /// Normalized signal (stage 2 output)
    pub normalized: Vec<f64>,
    /// Thresholded signal (stage 3 output)
    pub thresholded: Vec<i8>,
    /// Final edge list, after merging and corruption deletions
    pub edges: Vec<usize>,
    /// Recovered clock period in samples per half-bit span
    pub clock_period: usize,
    /// Recovered bits with their midpoint timestamps
    pub bits: Vec<BitRecord>,
    /// Bits packed 8 at a time, trailing partial group dropped
    pub bytes: Vec<u8>,
    /// Character rendering of the packed bytes
    pub text: String,
    /// Run counters
    pub stats: DemodStats,
}

impl Decoded {
    /// Recovered bits as a "0"/"1" string
    pub fn bitstream(&self) -> String {
        self.bits
            .iter()
            .map(|bit| if bit.value == 0 { '0' } else { '1' })
            .collect()
    }
}

/// Demodulator configured for one parameter set, reusable across traces
pub struct Demodulator {
    config: DemodConfig,
}

impl Demodulator {
    pub fn new(config: DemodConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline over a uniform trace
    pub fn demodulate(&self, trace: &UniformTrace) -> Result<Decoded, DemodError> {
        let normalized = normalize::normalize(&trace.values, self.config.rolling_average_window)?;
        let thresholded = threshold::threshold(&normalized, self.config.hysteresis_threshold);

        let detected = edges::detect(&thresholded);
        let edges_detected = detected.len();
        let merged = edges::merge(detected, self.config.edge_separation_samples)?;
        let edges_merged = edges_detected - merged.len();

        let clock_period = clock::recover(&merged)?;
        debug!(
            "Recovered clock period: {} samples ({} edges, {} merged)",
            clock_period, edges_detected, edges_merged
        );

        let times = trace.times();
        let outcome = decode::decode(
            merged,
            &times,
            clock_period,
            self.config.edge_transition_threshold,
        );

        let bit_values: Vec<u8> = outcome.bits.iter().map(|bit| bit.value).collect();
        let packed = bytes::pack(&bit_values);
        let text = bytes::to_text(&packed);

        let stats = DemodStats {
            edges_detected,
            edges_merged,
            edges_discarded: outcome.discarded,
            bits_decoded: outcome.bits.len(),
        };

        Ok(Decoded {
            normalized,
            thresholded,
            edges: outcome.edges,
            clock_period,
            bits: outcome.bits,
            bytes: packed,
            text,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(values: Vec<f64>) -> UniformTrace {
        UniformTrace {
            interval_ms: 25,
            start_ns: 0,
            values,
        }
    }

    /// Square-wave trace carrying `bits` in the differential two-level
    /// code: every bit starts with a transition, a "0" adds one at
    /// mid-period. Half-bit length is `half` samples; levels are raw
    /// bandwidth values around an uncontended baseline.
    fn encode_trace(bits: &str, half: usize) -> UniformTrace {
        let mut transitions = vec![half];
        let mut position = half;
        for bit in bits.chars() {
            if bit == '0' {
                transitions.push(position + half);
            }
            position += 2 * half;
            transitions.push(position);
        }

        let len = position + half;
        let mut values = Vec::with_capacity(len);
        let mut high = false;
        for index in 0..len {
            if transitions.contains(&index) {
                high = !high;
            }
            values.push(if high { 180.0 } else { 20.0 });
        }
        trace(values)
    }

    #[test]
    fn test_alternating_square_wave() {
        // 40 samples alternating 10/100 every 5 samples: the thresholder
        // reproduces the square wave exactly, one edge per boundary
        let mut values = Vec::new();
        for block in 0..8 {
            let level = if block % 2 == 0 { 10.0 } else { 100.0 };
            values.extend(std::iter::repeat(level).take(5));
        }

        let normalized = normalize::normalize(&values, 0).unwrap();
        let thresholded = threshold::threshold(&normalized, 0.1);

        let mut expected = Vec::new();
        for block in 0..8 {
            let level = if block % 2 == 0 { -1i8 } else { 1i8 };
            expected.extend(std::iter::repeat(level).take(5));
        }
        assert_eq!(thresholded, expected);
        assert_eq!(edges::detect(&thresholded), vec![4, 9, 14, 19, 24, 29, 34]);
    }

    #[test]
    fn test_decodes_known_message() {
        // "01001000" at a 10-sample half-bit, zero noise
        let trace = encode_trace("01001000", 10);
        let decoded = Demodulator::new(DemodConfig::default())
            .demodulate(&trace)
            .unwrap();

        assert_eq!(decoded.clock_period, 10);
        assert_eq!(decoded.bitstream(), "01001000");
        assert_eq!(decoded.bytes, vec![0x48]);
        assert_eq!(decoded.text, "H");
        assert_eq!(decoded.stats.edges_discarded, 0);
        assert_eq!(decoded.stats.bits_decoded, 8);
    }

    #[test]
    fn test_bit_timestamps_strictly_increase() {
        let trace = encode_trace("0110100100110100", 10);
        let decoded = Demodulator::new(DemodConfig::default())
            .demodulate(&trace)
            .unwrap();

        assert!(!decoded.bits.is_empty());
        for pair in decoded.bits.windows(2) {
            assert!(pair[1].time_s > pair[0].time_s);
        }
    }

    #[test]
    fn test_deterministic() {
        let trace = encode_trace("0100100001101001", 10);
        let demodulator = Demodulator::new(DemodConfig::default());

        let first = demodulator.demodulate(&trace).unwrap();
        let second = demodulator.demodulate(&trace).unwrap();

        assert_eq!(first.bitstream(), second.bitstream());
        assert_eq!(first.bytes, second.bytes);
        assert_eq!(first.clock_period, second.clock_period);
    }

    #[test]
    fn test_zero_amplitude_trace_is_degenerate() {
        // A flat zero trace must fail cleanly, not divide by zero
        let result = Demodulator::new(DemodConfig::default()).demodulate(&trace(vec![0.0; 64]));
        assert_eq!(result.unwrap_err(), DemodError::DegenerateSignal);
    }

    #[test]
    fn test_constant_trace_has_no_edges() {
        // Nonzero but flat: normalization flattens it to zero and the
        // thresholder never leaves LOW
        let result = Demodulator::new(DemodConfig::default()).demodulate(&trace(vec![42.0; 64]));
        assert_eq!(result.unwrap_err(), DemodError::NoEdgesDetected);
    }

    #[test]
    fn test_thresholded_output_is_binary() {
        let trace = encode_trace("01001000", 10);
        let decoded = Demodulator::new(DemodConfig::default())
            .demodulate(&trace)
            .unwrap();
        assert!(decoded.thresholded.iter().all(|&v| v == 1 || v == -1));
    }
}
