//! Differential decoding of the merged edge list
//!
//! The channel uses a differential two-level code: a "0" transmits as a
//! mid-period transition (two consecutive spans of roughly one clock
//! period), a "1" as no mid-period transition (one span of roughly two).
//! Decoding walks the edge list with a cursor and classifies each span by
//! its relative mismatch against the recovered clock.

use serde::Serialize;

/// One recovered bit and the elapsed-seconds midpoint it was observed at
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BitRecord {
    /// Midpoint of the spans that carried the bit, in elapsed seconds
    pub time_s: f64,
    /// Recovered bit value, 0 or 1
    pub value: u8,
}

/// Result of the differential decode pass
#[derive(Debug, Clone)]
pub struct DecodeOutcome {
    /// Recovered bits in transmission order
    pub bits: Vec<BitRecord>,
    /// Edge list after corrupted-edge deletions
    pub edges: Vec<usize>,
    /// Edges deleted by the corruption repair rule
    pub discarded: usize,
}

/// Decode the edge list against clock period `clock` with relative span
/// tolerance `tolerance`.
///
/// An edge that fits neither the bit-0 nor the bit-1 pattern is treated as
/// local corruption: it is deleted (no bit emitted, no checksum, no wider
/// correction) and the same cursor position is retried. Every iteration
/// advances the cursor or shrinks the edge list, so the loop terminates
/// within O(edge count) iterations.
///
/// The cursor advances by 2 after a "0" and by 1 after a "1"; this
/// asymmetry is the differential-Manchester framing and shifting it by one
/// edge would misalign every subsequent bit.
pub fn decode(
    mut edges: Vec<usize>,
    times: &[f64],
    clock: usize,
    tolerance: f64,
) -> DecodeOutcome {
    debug_assert!(clock > 0);
    let mut bits = Vec::new();
    let mut discarded = 0usize;
    let mut cursor = 0usize;

    while cursor + 1 < edges.len() {
        let mismatch_a = span_mismatch(edges[cursor], edges[cursor + 1], clock);
        let mismatch_b = (cursor + 2 < edges.len())
            .then(|| span_mismatch(edges[cursor + 1], edges[cursor + 2], clock));

        if mismatch_a <= tolerance && mismatch_b.is_some_and(|m| m <= tolerance) {
            bits.push(BitRecord {
                time_s: (times[edges[cursor]] + times[edges[cursor + 2]]) / 2.0,
                value: 0,
            });
            cursor += 2;
        } else if (1.0 - tolerance..=1.0 + tolerance).contains(&mismatch_a) {
            bits.push(BitRecord {
                time_s: (times[edges[cursor]] + times[edges[cursor + 1]]) / 2.0,
                value: 1,
            });
            cursor += 1;
        } else {
            edges.remove(cursor);
            discarded += 1;
        }
    }

    DecodeOutcome {
        bits,
        edges,
        discarded,
    }
}

/// Relative mismatch of an inter-edge span against the clock period
fn span_mismatch(from: usize, to: usize, clock: usize) -> f64 {
    ((to - from - 1) as f64 - clock as f64).abs() / clock as f64
}
