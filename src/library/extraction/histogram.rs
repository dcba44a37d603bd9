use crate::library::{
    definitions::{HIST_CHANNELS, HIST_VALUE_RANGE},
    img_ops::RgbImgBuf,
    FeaturePoint, Histogram,
};

/// Pixel counts of each color channel, in `num_bins` equal-width bins spanning 0..256.
pub fn rgb_histogram(img: &RgbImgBuf, image_index: usize, num_bins: usize) -> Histogram {
    let mut counts = vec![vec![0.0; num_bins]; HIST_CHANNELS];

    for pixel in img.pixels() {
        for (channel, &value) in pixel.0.iter().enumerate() {
            let bin = value as usize * num_bins / HIST_VALUE_RANGE;
            counts[channel][bin] += 1.0;
        }
    }

    let mut channels = counts
        .into_iter()
        .map(|channel_counts| FeaturePoint::new(channel_counts, image_index));
    //pixels are stored R, G, B and the iterator holds exactly HIST_CHANNELS entries.
    let (red, green, blue) = match (channels.next(), channels.next(), channels.next()) {
        (Some(r), Some(g), Some(b)) => (r, g, b),
        _ => unreachable!(),
    };

    Histogram::new(red, green, blue)
}
