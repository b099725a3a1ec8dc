//! Utility modules

pub mod imaging;

pub use imaging::ImageUtils;
