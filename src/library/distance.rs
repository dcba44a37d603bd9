use crate::library::{definitions::HIST_CHANNEL_WEIGHT, FeaturePoint, Histogram};

/// Sum of squared coordinate differences. Comparing points of different dimension is a programming
/// error and panics.
pub fn squared_euclidean(p: &FeaturePoint, q: &FeaturePoint) -> f64 {
    assert_eq!(
        p.dimension(),
        q.dimension(),
        "attempted to compare feature points of different dimension"
    );

    p.values()
        .iter()
        .zip(q.values().iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum()
}

/// Per-channel squared euclidean distance between two histograms, each channel weighted by a third.
pub fn histogram_distance(a: &Histogram, b: &Histogram) -> f64 {
    a.channels()
        .iter()
        .zip(b.channels().iter())
        .map(|(a_chan, b_chan)| HIST_CHANNEL_WEIGHT * squared_euclidean(a_chan, b_chan))
        .sum()
}
