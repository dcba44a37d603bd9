use serde::{Deserialize, Serialize};

use crate::library::definitions::HIST_CHANNELS;

/// A real valued feature vector, tagged with the index of the image it was extracted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturePoint {
    values: Vec<f64>,
    image_index: usize,
}

impl FeaturePoint {
    pub fn new(values: Vec<f64>, image_index: usize) -> Self {
        Self { values, image_index }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }
}

/// Global descriptor of an image: one histogram per color channel, ordered R, G, B.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    channels: [FeaturePoint; HIST_CHANNELS],
}

impl Histogram {
    pub fn new(red: FeaturePoint, green: FeaturePoint, blue: FeaturePoint) -> Self {
        assert!(
            red.dimension() == green.dimension() && green.dimension() == blue.dimension(),
            "histogram channels must have the same number of bins"
        );

        Self {
            channels: [red, green, blue],
        }
    }

    pub fn channels(&self) -> &[FeaturePoint; HIST_CHANNELS] {
        &self.channels
    }

    pub fn num_bins(&self) -> usize {
        self.channels[0].dimension()
    }

    pub fn image_index(&self) -> usize {
        self.channels[0].image_index()
    }
}
