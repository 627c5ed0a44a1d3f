//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod media;
mod repository;

pub use media::{ImageUpload, MediaUploader, UploadError, UploadedImage};
pub use repository::PostRepository;
