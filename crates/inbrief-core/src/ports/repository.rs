use async_trait::async_trait;

use crate::domain::{NewPost, Post};
use crate::error::RepoError;

/// Post storage.
///
/// Listings are ordered newest first by `created_at`, ties broken by the
/// higher id. Every mutating method touches one row and either commits the
/// whole change or leaves the store untouched.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All published posts.
    async fn list_published(&self) -> Result<Vec<Post>, RepoError>;

    /// All posts regardless of publish state.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// The post with `id` if it exists and is published.
    async fn find_published(&self, id: i32) -> Result<Option<Post>, RepoError>;

    /// Insert a post; the store assigns id and timestamps.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Hard-delete a post, returning the removed row.
    /// `RepoError::NotFound` if absent.
    async fn delete(&self, id: i32) -> Result<Post, RepoError>;

    /// Flip `is_published` and stamp `updated_at`.
    /// `RepoError::NotFound` if absent.
    async fn toggle_publish(&self, id: i32) -> Result<Post, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;

    /// Most recently created post.
    async fn latest(&self) -> Result<Option<Post>, RepoError>;

    /// Insert `posts` only if the store holds no posts. Returns how many
    /// were inserted.
    async fn seed_if_empty(&self, posts: Vec<NewPost>) -> Result<usize, RepoError>;
}
