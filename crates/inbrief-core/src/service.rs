//! News service - the operations the HTTP surface calls.

use std::sync::Arc;

use crate::domain::{NewPost, Post, PostInput, sample_posts};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

/// Store reachability summary reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub total_posts: u64,
    pub latest_post_id: Option<i32>,
}

/// Thin service over a [`PostRepository`].
///
/// Owns input validation so every store backend applies the same rules,
/// and turns missing rows into [`DomainError::NotFound`].
#[derive(Clone)]
pub struct NewsService {
    repo: Arc<dyn PostRepository>,
}

impl NewsService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_published(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.list_published().await?)
    }

    pub async fn list_all(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.list_all().await?)
    }

    /// Unpublished posts are reported as not found.
    pub async fn get_published(&self, id: i32) -> Result<Post, DomainError> {
        self.repo
            .find_published(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub async fn create(&self, input: PostInput) -> Result<Post, DomainError> {
        let post = NewPost::from_input(input)?;
        let created = self.repo.create(post).await?;
        tracing::info!(post_id = created.id, title = %created.title, "Post created");
        Ok(created)
    }

    pub async fn delete(&self, id: i32) -> Result<Post, DomainError> {
        let deleted = self.repo.delete(id).await.map_err(|e| not_found_for(e, id))?;
        tracing::info!(post_id = id, "Post deleted");
        Ok(deleted)
    }

    pub async fn toggle_publish(&self, id: i32) -> Result<Post, DomainError> {
        let post = self
            .repo
            .toggle_publish(id)
            .await
            .map_err(|e| not_found_for(e, id))?;
        tracing::info!(post_id = id, status = post.status_label(), "Post publish state toggled");
        Ok(post)
    }

    pub async fn stats(&self) -> Result<StoreStats, DomainError> {
        let total_posts = self.repo.count().await?;
        let latest_post_id = self.repo.latest().await?.map(|p| p.id);
        Ok(StoreStats {
            total_posts,
            latest_post_id,
        })
    }

    /// Insert the sample posts if the store is empty.
    pub async fn seed_samples(&self) -> Result<usize, DomainError> {
        Ok(self.repo.seed_if_empty(sample_posts()).await?)
    }
}

fn not_found_for(err: RepoError, id: i32) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => DomainError::Store(other),
    }
}
