//! Diagnostic record for the external plotting step
//!
//! The plotting step renders the normalized trace, the thresholded trace,
//! the detected edges, and a label per recovered bit. Rendering lives
//! outside this repository; the decoder writes the plot's input as one
//! JSON document.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::demod::{BitRecord, Decoded, DemodStats};
use crate::trace::UniformTrace;

/// Everything the plotting step consumes, in one document
#[derive(Serialize)]
struct DiagRecord<'a> {
    /// Wall-clock stamp of the decode, milliseconds since the epoch
    generated_at_ms: i64,
    /// Grid pitch of the resampled trace
    interval_ms: u64,
    /// Collector timestamp of grid point 0, nanoseconds
    start_ns: i64,
    /// Recovered clock period in samples
    clock_period: usize,
    /// Elapsed-seconds coordinate of every grid point
    time_s: Vec<f64>,
    /// Normalized signal
    normalized: &'a [f64],
    /// Thresholded signal
    thresholded: &'a [i8],
    /// Final edge indices
    edges: &'a [usize],
    /// Recovered bits with midpoint timestamps
    bits: &'a [BitRecord],
    /// Run counters
    stats: DemodStats,
    /// Recovered bits as a "0"/"1" string
    bitstream: String,
    /// Character rendering of the recovered bytes
    text: &'a str,
}

/// Serialize the decode's diagnostic record to `path` as JSON
pub fn write_record(path: &Path, trace: &UniformTrace, decoded: &Decoded) -> Result<()> {
    let record = DiagRecord {
        generated_at_ms: chrono::Utc::now().timestamp_millis(),
        interval_ms: trace.interval_ms,
        start_ns: trace.start_ns,
        clock_period: decoded.clock_period,
        time_s: trace.times(),
        normalized: &decoded.normalized,
        thresholded: &decoded.thresholded,
        edges: &decoded.edges,
        bits: &decoded.bits,
        stats: decoded.stats,
        bitstream: decoded.bitstream(),
        text: &decoded.text,
    };

    let json = serde_json::to_string_pretty(&record)
        .context("Failed to serialize diagnostic record")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write diagnostic record to {}", path.display()))?;

    Ok(())
}
