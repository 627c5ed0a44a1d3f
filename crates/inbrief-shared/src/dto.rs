//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Admin form submission for a new post.
///
/// Every field is optional on the wire; a missing title is a validation
/// failure, not a decoding error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Result of a successful admin image upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadImageResponse {
    pub success: bool,
    pub image_url: String,
    pub public_id: String,
}

/// Health probe result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub total_posts: u64,
    pub latest_post_id: Option<i32>,
    pub timestamp: String,
}

/// Health probe result when the store cannot be queried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
    pub timestamp: String,
}
