use async_trait::async_trait;

/// An image received from the admin, on its way to the media host.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: Option<String>,
    /// Folder or category label on the media host.
    pub folder: String,
}

/// Where the media host stored the transformed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub secure_url: String,
    pub public_id: String,
}

/// Media host - stores a resized copy of an image and returns a public URL.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, UploadError>;
}

/// Media host failures. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("media uploads are not configured")]
    NotConfigured,

    #[error("request to media host failed: {0}")]
    Transport(String),

    #[error("media host rejected the upload ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected response from media host: {0}")]
    InvalidResponse(String),
}
