//! Pipeline error taxonomy

use thiserror::Error;

/// Fatal demodulation failures. All four end the run: the input is a fixed
/// batch, so the remedy is re-acquiring the measurement or reconfiguring,
/// never retrying.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DemodError {
    /// Nothing left after dropping invalid rows and warmup probes
    #[error("no usable samples after filtering")]
    EmptySignal,

    /// The raw trace has zero peak amplitude and cannot be scaled
    #[error("degenerate signal: raw trace has zero amplitude")]
    DegenerateSignal,

    /// Fewer than 2 edges survived detection and merging
    #[error("fewer than 2 edges detected in thresholded signal")]
    NoEdgesDetected,

    /// Edge spacing statistics too thin to estimate a clock period
    #[error("no clock period detected from edge spacing")]
    NoClockDetected,
}
