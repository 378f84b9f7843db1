//! Collector log parsing
//!
//! The collector writes a CSV log with header `type,bandwidth,time`:
//! - `type`: "warmup" or "measurement"
//! - `bandwidth`: floating-point throughput measurement
//! - `time`: monotonic nanosecond-resolution timestamp
//!
//! Columns are resolved by header name, so the order does not matter.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::debug;

/// Probe classification from the collector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    /// Cache/scheduler warmup probe, excluded from demodulation
    Warmup,
    /// Live measurement probe
    Measurement,
}

/// One bandwidth probe as logged by the collector
#[derive(Debug, Clone)]
pub struct Sample {
    /// Monotonic timestamp in nanoseconds
    pub timestamp_ns: i64,
    /// Measured throughput
    pub bandwidth: f64,
    /// Probe classification
    pub kind: SampleKind,
}

/// Counters from one log parse
#[derive(Debug, Default, Clone, Copy)]
pub struct LoadSummary {
    /// Data rows seen (header excluded)
    pub rows_read: u64,
    /// Rows skipped for a missing, unparseable, or non-finite field
    pub rows_dropped: u64,
}

/// Read and parse a collector log from disk
pub fn load_samples(path: &Path) -> Result<(Vec<Sample>, LoadSummary)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read collector log {}", path.display()))?;
    parse_log(&text)
}

/// Parse collector log text into samples
pub fn parse_log(text: &str) -> Result<(Vec<Sample>, LoadSummary)> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header = match lines.next() {
        Some(h) => h,
        None => bail!("Collector log is empty"),
    };
    let columns = resolve_columns(header)?;

    let mut samples = Vec::new();
    let mut summary = LoadSummary::default();

    for line in lines {
        summary.rows_read += 1;
        match parse_row(line, &columns) {
            Some(sample) => samples.push(sample),
            None => {
                summary.rows_dropped += 1;
                debug!("Dropped unparseable row: {}", line.trim());
            }
        }
    }

    Ok((samples, summary))
}

/// Column positions of the three required fields
struct Columns {
    kind: usize,
    bandwidth: usize,
    time: usize,
}

fn resolve_columns(header: &str) -> Result<Columns> {
    let names: Vec<&str> = header.split(',').map(str::trim).collect();
    let find = |name: &str| names.iter().position(|n| *n == name);

    match (find("type"), find("bandwidth"), find("time")) {
        (Some(kind), Some(bandwidth), Some(time)) => Ok(Columns {
            kind,
            bandwidth,
            time,
        }),
        _ => bail!(
            "Collector log header {:?} is missing one of type/bandwidth/time",
            header.trim()
        ),
    }
}

fn parse_row(line: &str, columns: &Columns) -> Option<Sample> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();

    let kind_field = fields.get(columns.kind)?;
    let bandwidth: f64 = fields.get(columns.bandwidth)?.parse().ok()?;
    let timestamp_ns: i64 = fields.get(columns.time)?.parse().ok()?;

    if !bandwidth.is_finite() {
        return None;
    }

    // The collector only distinguishes warmup probes; any other tag is a
    // measurement.
    let kind = if *kind_field == "warmup" {
        SampleKind::Warmup
    } else {
        SampleKind::Measurement
    };

    Some(Sample {
        timestamp_ns,
        bandwidth,
        kind,
    })
}
