//! Frame sources

pub mod camera;
pub mod directory;
pub mod memory;

pub use camera::CameraSource;
pub use directory::DirectorySource;
pub use memory::MemorySource;
