//! Media host clients.

mod cloudinary;

use async_trait::async_trait;

use inbrief_core::ports::{ImageUpload, MediaUploader, UploadError, UploadedImage};

pub use cloudinary::{CloudinaryConfig, CloudinaryUploader};

/// Uploader used when no media host credentials are configured.
pub struct DisabledUploader;

#[async_trait]
impl MediaUploader for DisabledUploader {
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, UploadError> {
        tracing::warn!(filename = %image.filename, "Image upload attempted without a media host");
        Err(UploadError::NotConfigured)
    }
}
