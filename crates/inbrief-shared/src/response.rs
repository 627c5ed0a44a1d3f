//! JSON envelopes returned by the public API.

use serde::{Deserialize, Serialize};

/// `{success, total_posts, posts}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsListResponse<P> {
    pub success: bool,
    pub total_posts: usize,
    pub posts: Vec<P>,
}

impl<P> NewsListResponse<P> {
    pub fn ok(posts: Vec<P>) -> Self {
        Self {
            success: true,
            total_posts: posts.len(),
            posts,
        }
    }
}

/// `{success, post}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItemResponse<P> {
    pub success: bool,
    pub post: P,
}

impl<P> NewsItemResponse<P> {
    pub fn ok(post: P) -> Self {
        Self {
            success: true,
            post,
        }
    }
}

/// `{error}` - used for not-found and unhandled server errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    pub fn post_not_found() -> Self {
        Self::new("Post not found")
    }

    pub fn endpoint_not_found() -> Self {
        Self::new("Endpoint not found")
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}

/// `{success: false, error}` - a failed API operation with its cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFailure {
    pub success: bool,
    pub error: String,
}

impl ApiFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
