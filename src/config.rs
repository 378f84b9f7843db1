//! Configuration loaded from environment variables

use std::path::PathBuf;

/// Demodulation parameters, threaded as one immutable value through every
/// pipeline stage so a single process can decode repeatedly with different
/// settings.
#[derive(Debug, Clone)]
pub struct DemodConfig {
    /// Hysteresis band half-width for the thresholder (0 < h < 1)
    pub hysteresis_threshold: f64,

    /// Rolling-average window for baseline removal (0 = global mean)
    pub rolling_average_window: usize,

    /// Edges closer than this many samples are merged into one
    pub edge_separation_samples: usize,

    /// Relative tolerance for an edge span to match the clock period
    pub edge_transition_threshold: f64,
}

impl Default for DemodConfig {
    fn default() -> Self {
        Self {
            hysteresis_threshold: 0.1,
            rolling_average_window: 0,
            edge_separation_samples: 7,
            edge_transition_threshold: 0.5,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the collector's bandwidth log
    pub input_path: PathBuf,

    /// Where to write the diagnostic record (unset = skip the write)
    pub diag_path: Option<PathBuf>,

    /// Uniform resampling grid pitch in milliseconds
    pub resample_interval_ms: u64,

    /// Demodulation parameters
    pub demod: DemodConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = DemodConfig::default();

        Self {
            input_path: std::env::var("INPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("bandwidth.csv")),

            diag_path: std::env::var("DIAG_PATH")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),

            resample_interval_ms: std::env::var("RESAMPLE_INTERVAL_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|&ms: &u64| ms > 0)
                .unwrap_or(25),

            demod: DemodConfig {
                hysteresis_threshold: std::env::var("HYSTERESIS_THRESHOLD")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.hysteresis_threshold),

                rolling_average_window: std::env::var("ROLLING_AVERAGE_WINDOW")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.rolling_average_window),

                edge_separation_samples: std::env::var("EDGE_SEPARATION_SAMPLES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.edge_separation_samples),

                edge_transition_threshold: std::env::var("EDGE_TRANSITION_THRESHOLD")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.edge_transition_threshold),
            },
        }
    }
}
