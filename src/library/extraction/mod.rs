mod histogram;
mod local_features;

use std::path::Path;

use histogram::rgb_histogram;
use local_features::{describe_keypoints, detect_keypoints};

use crate::library::{
    definitions::{FAST_THRESHOLD, MAX_HIST_BINS},
    img_ops, ExtractionError, FeaturePoint, Histogram,
};

/// Computes the descriptors the ranking engine works on. Every returned point is tagged with
/// `image_index`.
pub trait FeatureExtractor {
    fn extract_histogram(&self, path: &Path, image_index: usize, num_bins: u32) -> Result<Histogram, ExtractionError>;

    fn extract_local_features(
        &self,
        path: &Path,
        image_index: usize,
        max_features: usize,
    ) -> Result<Vec<FeaturePoint>, ExtractionError>;
}

/// Extracts descriptors from image files on disk.
///
/// Local features are FAST corners, each described by a histogram of gradient orientations over
/// the patch surrounding it.
#[derive(Debug, Clone, Copy)]
pub struct ImageExtractor {
    pub fast_threshold: u8,
}

impl Default for ImageExtractor {
    fn default() -> Self {
        Self {
            fast_threshold: FAST_THRESHOLD,
        }
    }
}

impl FeatureExtractor for ImageExtractor {
    fn extract_histogram(&self, path: &Path, image_index: usize, num_bins: u32) -> Result<Histogram, ExtractionError> {
        if num_bins == 0 || num_bins > MAX_HIST_BINS {
            return Err(ExtractionError::InvalidParameter(format!(
                "number of bins must be between 1 and {}, got {}",
                MAX_HIST_BINS, num_bins
            )));
        }

        let img = img_ops::open_rgb(path)?;
        Ok(rgb_histogram(&img, image_index, num_bins as usize))
    }

    fn extract_local_features(
        &self,
        path: &Path,
        image_index: usize,
        max_features: usize,
    ) -> Result<Vec<FeaturePoint>, ExtractionError> {
        if max_features == 0 {
            return Err(ExtractionError::InvalidParameter(
                "number of features to extract must be at least 1".to_string(),
            ));
        }

        let img = img_ops::open_gray(path)?;
        let keypoints = detect_keypoints(&img, self.fast_threshold, max_features);
        trace!("{} keypoints in {}", keypoints.len(), path.display());

        Ok(describe_keypoints(&img, &keypoints, image_index))
    }
}
