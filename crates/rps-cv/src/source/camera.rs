//! Webcam capture through OpenCV videoio

use crate::traits::FrameSource;
use crate::Result;
use anyhow::Context;
use image::RgbImage;
use opencv::{
    core::Mat,
    imgproc,
    prelude::*,
    videoio::{self, VideoCapture},
};
use rps_core::ArenaError;

pub struct CameraSource {
    cap: VideoCapture,
}

impl CameraSource {
    /// Open camera `index`. Failing to open is [`ArenaError::StreamUnavailable`].
    pub fn open(index: i32) -> Result<Self> {
        let cap = VideoCapture::new(index, videoio::CAP_ANY)
            .map_err(|e| ArenaError::StreamUnavailable(format!("camera {index}: {e}")))?;
        if !cap.is_opened().unwrap_or(false) {
            return Err(ArenaError::StreamUnavailable(format!("camera {index} did not open")).into());
        }
        Ok(Self { cap })
    }
}

impl FrameSource for CameraSource {
    fn read(&mut self) -> Result<Option<RgbImage>> {
        let mut bgr = Mat::default();
        if !self.cap.read(&mut bgr)? || bgr.empty() {
            return Ok(None);
        }

        // OpenCV delivers BGR
        let mut rgb = Mat::default();
        imgproc::cvt_color(&bgr, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;

        let (width, height) = (rgb.cols() as u32, rgb.rows() as u32);
        let data = rgb.data_bytes()?.to_vec();
        RgbImage::from_raw(width, height, data)
            .map(Some)
            .context("Camera frame has an unexpected layout")
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        let _ = self.cap.release();
    }
}
