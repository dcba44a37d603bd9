use crate::library::{FeaturePoint, Histogram};

/// Everything extracted from a single indexed image.
#[derive(Debug, Clone)]
pub struct ImageDescriptorSet {
    histogram: Histogram,
    local_features: Vec<FeaturePoint>,
}

impl ImageDescriptorSet {
    pub fn new(histogram: Histogram, local_features: Vec<FeaturePoint>) -> Self {
        Self {
            histogram,
            local_features,
        }
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn local_features(&self) -> &[FeaturePoint] {
        &self.local_features
    }
}

/// Descriptors of every indexed image. The position of an entry is the image index used
/// throughout ranking. Built once, then only read while answering queries.
#[derive(Debug, Clone, Default)]
pub struct DescriptorDatabase {
    images: Vec<ImageDescriptorSet>,
}

impl DescriptorDatabase {
    pub fn new() -> Self {
        Self { images: vec![] }
    }

    /// Appends the descriptors of the next image, returning the image index it was given.
    pub fn push(&mut self, descriptors: ImageDescriptorSet) -> usize {
        self.images.push(descriptors);
        self.images.len() - 1
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, image_index: usize) -> Option<&ImageDescriptorSet> {
        self.images.get(image_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ImageDescriptorSet)> {
        self.images.iter().enumerate()
    }

    pub fn images(&self) -> &[ImageDescriptorSet] {
        &self.images
    }

    pub fn total_local_features(&self) -> usize {
        self.images.iter().map(|img| img.local_features.len()).sum()
    }
}

impl std::iter::FromIterator<ImageDescriptorSet> for DescriptorDatabase {
    fn from_iter<I: IntoIterator<Item = ImageDescriptorSet>>(iter: I) -> Self {
        Self {
            images: iter.into_iter().collect(),
        }
    }
}
