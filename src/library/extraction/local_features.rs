use std::f64::consts::PI;

use image::{ImageBuffer, Luma};
use imageproc::{
    corners::corners_fast9,
    gradients::{horizontal_sobel, vertical_sobel},
};

use crate::library::{
    definitions::{DESC_CELLS, DESC_CELL_SIZE, DESC_CLAMP, DESC_DIMENSION, DESC_ORIENTATION_BINS, DESC_PATCH_SIZE},
    img_ops::GrayImgBuf,
    FeaturePoint,
};

type GradientBuf = ImageBuffer<Luma<i16>, Vec<i16>>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub x: u32,
    pub y: u32,
    pub score: f32,
}

/// Finds up to `max_keypoints` FAST corners, strongest first. Corners too close to the border for a
/// full descriptor patch are skipped.
pub fn detect_keypoints(img: &GrayImgBuf, threshold: u8, max_keypoints: usize) -> Vec<Keypoint> {
    let (width, height) = img.dimensions();
    let half_patch = (DESC_PATCH_SIZE / 2) as u32;

    let mut keypoints = corners_fast9(img, threshold)
        .into_iter()
        .filter(|c| c.x >= half_patch && c.y >= half_patch && c.x + half_patch <= width && c.y + half_patch <= height)
        .map(|c| Keypoint {
            x: c.x,
            y: c.y,
            score: c.score,
        })
        .collect::<Vec<_>>();

    keypoints.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.y.cmp(&b.y))
            .then_with(|| a.x.cmp(&b.x))
    });
    keypoints.truncate(max_keypoints);

    keypoints
}

/// Describes each keypoint by the gradient orientations in the patch around it.
pub fn describe_keypoints(img: &GrayImgBuf, keypoints: &[Keypoint], image_index: usize) -> Vec<FeaturePoint> {
    let grad_x = horizontal_sobel(img);
    let grad_y = vertical_sobel(img);

    keypoints
        .iter()
        .map(|kp| FeaturePoint::new(describe_one(&grad_x, &grad_y, kp), image_index))
        .collect()
}

fn describe_one(grad_x: &GradientBuf, grad_y: &GradientBuf, kp: &Keypoint) -> Vec<f64> {
    let mut desc = vec![0.0; DESC_DIMENSION];

    let left = kp.x - (DESC_PATCH_SIZE / 2) as u32;
    let top = kp.y - (DESC_PATCH_SIZE / 2) as u32;

    for py in 0..DESC_PATCH_SIZE {
        for px in 0..DESC_PATCH_SIZE {
            let x = left + px as u32;
            let y = top + py as u32;
            let dx = grad_x.get_pixel(x, y)[0] as f64;
            let dy = grad_y.get_pixel(x, y)[0] as f64;

            let magnitude = dx.hypot(dy);
            if magnitude == 0.0 {
                continue;
            }

            let mut angle = dy.atan2(dx);
            if angle < 0.0 {
                angle += 2.0 * PI;
            }
            let orientation = ((angle / (2.0 * PI)) * DESC_ORIENTATION_BINS as f64) as usize % DESC_ORIENTATION_BINS;

            let cell = (py / DESC_CELL_SIZE) * DESC_CELLS + (px / DESC_CELL_SIZE);
            desc[cell * DESC_ORIENTATION_BINS + orientation] += magnitude;
        }
    }

    //normalise, damp dominant gradients, then normalise again so contrast changes do not matter.
    normalise(&mut desc);
    desc.iter_mut().for_each(|v| *v = v.min(DESC_CLAMP));
    normalise(&mut desc);

    desc
}

fn normalise(desc: &mut [f64]) {
    let norm = desc.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        desc.iter_mut().for_each(|v| *v /= norm);
    }
}
