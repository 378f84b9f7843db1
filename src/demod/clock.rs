//! Blind clock-period recovery
//!
//! The transmitter's bit clock is unknown, but it leaves a signature in
//! the edge spacing: spans of one clock period (the halves of a "0") and
//! spans of two (a full "1"). The histogram of inter-edge distances peaks
//! at both, and scoring each candidate period by its fundamental plus
//! first harmonic picks the true period over its multiples.

use super::DemodError;

/// Sentinel "no valid period" value the search starts from. Its baseline
/// score is the histogram's bucket 0: adjacent edges are strictly
/// ascending, so distance-0 mass can only come from corrupt input, and any
/// real candidate has to out-score it. A winner that never beats the
/// sentinel aborts the decode instead of reaching the divider as zero.
const SENTINEL_PERIOD: usize = 0;

/// Estimate the clock period (samples per half-bit span) from a merged
/// edge list.
pub fn recover(edges: &[usize]) -> Result<usize, DemodError> {
    recover_from_histogram(&distance_histogram(edges))
}

/// Count occurrences of each adjacent-edge distance. Slot `d` holds the
/// number of edge pairs exactly `d` samples apart.
pub fn distance_histogram(edges: &[usize]) -> Vec<u32> {
    let max_distance = edges.windows(2).map(|pair| pair[1] - pair[0]).max();
    let Some(max_distance) = max_distance else {
        return Vec::new();
    };

    let mut histogram = vec![0u32; max_distance + 1];
    for pair in edges.windows(2) {
        histogram[pair[1] - pair[0]] += 1;
    }
    histogram
}

/// Pick the period with the best harmonic sum `hist[f] + hist[2f]` among
/// candidates `1..=max_distance/2`. Fails with `NoClockDetected` when
/// fewer than 2 distinct distances are populated, or when no candidate
/// beats the sentinel baseline.
pub fn recover_from_histogram(histogram: &[u32]) -> Result<usize, DemodError> {
    let populated = histogram.iter().filter(|&&count| count > 0).count();
    if populated < 2 {
        return Err(DemodError::NoClockDetected);
    }

    let max_distance = histogram.len() - 1;
    let mut best_period = SENTINEL_PERIOD;
    let mut best_score = histogram[SENTINEL_PERIOD];

    for candidate in 1..=max_distance / 2 {
        let fundamental = histogram[candidate];
        let harmonic = histogram.get(candidate * 2).copied().unwrap_or(0);
        let score = fundamental + harmonic;
        if score > best_score {
            best_period = candidate;
            best_score = score;
        }
    }

    if best_period == SENTINEL_PERIOD {
        return Err(DemodError::NoClockDetected);
    }
    Ok(best_period)
}
