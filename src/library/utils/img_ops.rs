use std::path::Path;

use image::*;

use crate::library::ExtractionError;

pub type RgbImgBuf = ImageBuffer<Rgb<u8>, Vec<u8>>;
pub type GrayImgBuf = ImageBuffer<Luma<u8>, Vec<u8>>;

impl ExtractionError {
    fn from_image_error(path: &Path, e: ImageError) -> Self {
        Self::ImageLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}

pub fn open_rgb(path: &Path) -> Result<RgbImgBuf, ExtractionError> {
    let img = image::open(path).map_err(|e| ExtractionError::from_image_error(path, e))?;
    Ok(img.to_rgb8())
}

pub fn open_gray(path: &Path) -> Result<GrayImgBuf, ExtractionError> {
    let img = image::open(path).map_err(|e| ExtractionError::from_image_error(path, e))?;
    Ok(img.to_luma8())
}
