//! Cloudinary image upload client.
//!
//! Uses the signed upload API: every request carries the API key, a unix
//! timestamp and a SHA-1 signature over the other signed parameters.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use inbrief_core::ports::{ImageUpload, MediaUploader, UploadError, UploadedImage};

/// Fill-crop to 800x600 with automatic quality, then automatic format.
pub const UPLOAD_TRANSFORMATION: &str = "c_fill,h_600,q_auto:good,w_800/f_auto";

/// Cloudinary account settings.
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base: String,
    /// Whole-request timeout for one upload.
    pub timeout: Duration,
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorMessage,
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: String,
}

/// [`MediaUploader`] backed by Cloudinary.
pub struct CloudinaryUploader {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryUploader {
    pub fn new(config: CloudinaryConfig) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name
        )
    }
}

/// `k=v` pairs sorted by key and joined with `&`.
fn string_to_sign(params: &[(&str, &str)]) -> String {
    let mut sorted: Vec<&(&str, &str)> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(string_to_sign(params).as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

fn interpret_response(status: StatusCode, body: &str) -> Result<UploadedImage, UploadError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.to_string());
        return Err(UploadError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    let parsed: UploadResponse =
        serde_json::from_str(body).map_err(|e| UploadError::InvalidResponse(e.to_string()))?;

    Ok(UploadedImage {
        secure_url: parsed.secure_url,
        public_id: parsed.public_id,
    })
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, UploadError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &[
                ("folder", image.folder.as_str()),
                ("timestamp", timestamp.as_str()),
                ("transformation", UPLOAD_TRANSFORMATION),
            ],
            &self.config.api_secret,
        );

        let size = image.bytes.len();
        let mut part = Part::bytes(image.bytes).file_name(image.filename.clone());
        if let Some(content_type) = image.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| UploadError::Transport(e.to_string()))?;
        }

        let form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", image.folder.clone())
            .text("transformation", UPLOAD_TRANSFORMATION)
            .text("signature", signature);

        tracing::debug!(
            filename = %image.filename,
            folder = %image.folder,
            size,
            "Uploading image to Cloudinary"
        );

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let uploaded = interpret_response(status, &body)?;
        tracing::info!(public_id = %uploaded.public_id, "Image uploaded");
        Ok(uploaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_are_sorted_and_empty_values_skipped() {
        let joined = string_to_sign(&[
            ("timestamp", "1700000000"),
            ("folder", "inbrief-news"),
            ("public_id", ""),
            ("transformation", UPLOAD_TRANSFORMATION),
        ]);

        assert_eq!(
            joined,
            "folder=inbrief-news&timestamp=1700000000&transformation=c_fill,h_600,q_auto:good,w_800/f_auto"
        );
    }

    #[test]
    fn signature_depends_on_secret_and_params() {
        let params = [("folder", "inbrief-news"), ("timestamp", "1700000000")];
        let a = sign(&params, "secret-a");

        assert_eq!(a.len(), 40);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(a, sign(&params, "secret-a"));
        assert_ne!(a, sign(&params, "secret-b"));
        assert_ne!(a, sign(&[("folder", "other"), ("timestamp", "1700000000")], "secret-a"));
    }

    #[test]
    fn signature_is_sha1_of_joined_params_and_secret() {
        let signature = sign(
            &[
                ("transformation", UPLOAD_TRANSFORMATION),
                ("timestamp", "1700000000"),
                ("folder", "inbrief-news"),
            ],
            "secret-a",
        );

        assert_eq!(signature, "10d4d6f2e09ead506dce1f3a040baca332fa7ed6");
    }

    #[test]
    fn success_body_yields_url_and_id() {
        let body = r#"{"public_id":"inbrief-news/abc123","secure_url":"https://res.cloudinary.com/demo/image/upload/v1/inbrief-news/abc123.jpg","bytes":1024}"#;
        let uploaded = interpret_response(StatusCode::OK, body).unwrap();

        assert_eq!(uploaded.public_id, "inbrief-news/abc123");
        assert!(uploaded.secure_url.starts_with("https://res.cloudinary.com/"));
    }

    #[test]
    fn error_body_message_is_surfaced() {
        let body = r#"{"error":{"message":"Invalid image file"}}"#;
        let err = interpret_response(StatusCode::BAD_REQUEST, body).unwrap_err();

        match err {
            UploadError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid image file");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_success_body_is_invalid_response() {
        let err = interpret_response(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, UploadError::InvalidResponse(_)));
    }

    #[test]
    fn upload_url_tolerates_trailing_slash() {
        let uploader = CloudinaryUploader::new(CloudinaryConfig {
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            api_base: "https://api.cloudinary.com/".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        assert_eq!(
            uploader.upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }
}
