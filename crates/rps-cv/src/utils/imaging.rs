//! Image processing utilities
//!
//! Frames travel as `image::RgbImage`. Drawing goes through OpenCV, so frames
//! cross into a `Mat` and back; the `Mat` keeps RGB channel order.

use crate::Result;
use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::RgbImage;
use opencv::{core::Mat, prelude::*};
use std::path::Path;

/// Image utility functions
pub struct ImageUtils;

impl ImageUtils {
    /// Load an image file as RGB
    pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
        let img = image::open(&path)
            .with_context(|| format!("Failed to open image: {:?}", path.as_ref()))?;
        Ok(img.to_rgb8())
    }

    /// Resize to exactly `(width, height)`; frames already that size pass through
    pub fn fit(frame: RgbImage, (width, height): (u32, u32)) -> RgbImage {
        if frame.dimensions() == (width, height) || width == 0 || height == 0 {
            return frame;
        }
        imageops::resize(&frame, width, height, FilterType::Triangle)
    }

    /// Copy an RGB frame into a 3-channel `Mat`, channels left in RGB order
    pub fn rgb_to_mat(frame: &RgbImage) -> Result<Mat> {
        let flat = Mat::from_slice(frame.as_raw()).context("Failed to wrap frame as Mat")?;
        let shaped = flat
            .reshape(3, frame.height() as i32)
            .context("Failed to reshape frame Mat")?;
        shaped.try_clone().context("Failed to copy frame Mat")
    }

    /// Copy a 3-channel RGB-ordered `Mat` back into an `RgbImage`
    pub fn mat_to_rgb(mat: &Mat) -> Result<RgbImage> {
        let (width, height) = (mat.cols() as u32, mat.rows() as u32);
        let data = mat.data_bytes().context("Mat is not continuous")?.to_vec();
        RgbImage::from_raw(width, height, data).context("Mat has an unexpected layout")
    }

    /// Encode as JPEG at `quality` (1-100)
    pub fn encode_jpeg(frame: &RgbImage, quality: u8) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
            .encode_image(frame)
            .context("Failed to encode frame as JPEG")?;
        Ok(buffer)
    }
}
