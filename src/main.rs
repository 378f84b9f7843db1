//! Bandwidth covert-channel decoder
//!
//! Reads the bandwidth log produced by the measurement collector,
//! demodulates the covert bitstream riding on the contention pattern, and
//! prints the recovered bytes. Optionally writes the diagnostic record the
//! plotting step consumes.

mod config;
mod demod;
mod diag;
mod trace;

use anyhow::Result;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use config::Config;
use demod::Demodulator;

fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .init();

    info!("===========================================");
    info!("   Bandwidth Covert-Channel Decoder");
    info!("===========================================");

    let config = Config::from_env();
    info!("Configuration:");
    info!("  Input: {}", config.input_path.display());
    info!("  Resample interval: {} ms", config.resample_interval_ms);
    info!(
        "  Hysteresis threshold: {}",
        config.demod.hysteresis_threshold
    );
    info!(
        "  Rolling average window: {}",
        config.demod.rolling_average_window
    );
    info!(
        "  Edge separation: {} samples",
        config.demod.edge_separation_samples
    );
    info!(
        "  Edge transition threshold: {}",
        config.demod.edge_transition_threshold
    );

    let (samples, summary) = trace::load_samples(&config.input_path)?;
    if summary.rows_dropped > 0 {
        warn!(
            "Dropped {} of {} rows with missing or invalid fields",
            summary.rows_dropped, summary.rows_read
        );
    }
    info!("Loaded {} samples", samples.len());

    let uniform = trace::resample(&samples, config.resample_interval_ms)?;
    info!(
        "Resampled to {} grid points at {} ms",
        uniform.len(),
        uniform.interval_ms
    );

    let decoded = Demodulator::new(config.demod.clone()).demodulate(&uniform)?;

    info!(
        "[Demod] Edges: {} detected, {} merged, {} discarded | Clock: {} samples | Bits: {}",
        decoded.stats.edges_detected,
        decoded.stats.edges_merged,
        decoded.stats.edges_discarded,
        decoded.clock_period,
        decoded.stats.bits_decoded
    );

    info!("Recovered {} complete bytes", decoded.bytes.len());

    println!("Bits: {}", decoded.bitstream());
    println!("ASCII: {}", decoded.text);

    if let Some(path) = &config.diag_path {
        diag::write_record(path, &uniform, &decoded)?;
        info!("Diagnostic record written to {}", path.display());
    }

    Ok(())
}
