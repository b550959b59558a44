//! Global threshold used to binarize mask intensity before tracing.

use ndarray::Array2;

use crate::consts::OTSU_HISTOGRAM_BINS;

use super::config::ThresholdMethod;

/// Threshold selected by `method` for intensities in [0, 1].
pub fn threshold_for(intensity: &Array2<f32>, method: &ThresholdMethod) -> f32 {
    match method {
        ThresholdMethod::Otsu => otsu_threshold(intensity),
        ThresholdMethod::Fixed(v) => *v,
    }
}

fn histogram(intensity: &Array2<f32>) -> [u64; OTSU_HISTOGRAM_BINS] {
    let top = (OTSU_HISTOGRAM_BINS - 1) as f32;
    let mut counts = [0u64; OTSU_HISTOGRAM_BINS];
    for &v in intensity {
        let bin = (v.clamp(0.0, 1.0) * top).round() as usize;
        counts[bin.min(OTSU_HISTOGRAM_BINS - 1)] += 1;
    }
    counts
}

/// Otsu's method: the bin split with the largest between-class variance.
///
/// Returns the upper edge of the winning background bin, so `v > threshold`
/// selects the foreground. A single-valued histogram yields the edge of the
/// first bin.
pub fn otsu_threshold(intensity: &Array2<f32>) -> f32 {
    let counts = histogram(intensity);
    let total: u64 = counts.iter().sum();
    let weighted_total: f64 = counts
        .iter()
        .enumerate()
        .map(|(bin, &c)| bin as f64 * c as f64)
        .sum();

    let mut below = 0u64;
    let mut weighted_below = 0.0_f64;
    let mut best_score = 0.0_f64;
    let mut best_bin = 0usize;

    for (bin, &count) in counts.iter().enumerate() {
        below += count;
        weighted_below += bin as f64 * count as f64;
        if below == 0 {
            continue;
        }
        let above = total - below;
        if above == 0 {
            break;
        }

        let (wb, wa) = (below as f64, above as f64);
        let spread = weighted_below / wb - (weighted_total - weighted_below) / wa;
        let score = wb * wa * spread * spread;
        if score > best_score {
            best_score = score;
            best_bin = bin;
        }
    }

    (best_bin as f32 + 0.5) / (OTSU_HISTOGRAM_BINS - 1) as f32
}
