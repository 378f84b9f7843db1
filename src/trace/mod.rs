//! Collector trace ingestion and uniform-grid resampling
//!
//! The measurement collector logs one bandwidth probe per line. This module
//! turns that log into the demodulator's input:
//! 1. Parse the CSV log (`type,bandwidth,time`)
//! 2. Drop unparseable rows and warmup probes
//! 3. Bucket onto a fixed-interval time grid, averaging and interpolating

mod loader;
mod resample;

pub use loader::{load_samples, parse_log, LoadSummary, Sample, SampleKind};
pub use resample::{resample, UniformTrace};
