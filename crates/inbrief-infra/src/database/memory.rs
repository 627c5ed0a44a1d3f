//! In-memory post store - used when no database is configured, and in tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use inbrief_core::domain::{NewPost, Post};
use inbrief_core::error::RepoError;
use inbrief_core::ports::PostRepository;

#[derive(Default)]
struct Store {
    posts: Vec<Post>,
    /// Last id handed out. Ids of deleted posts are never reused.
    last_id: i32,
}

impl Store {
    fn insert(&mut self, new_post: NewPost) -> Post {
        self.last_id += 1;
        let now = Utc::now();
        let post = Post {
            id: self.last_id,
            title: new_post.title,
            content: new_post.content,
            image_url: new_post.image_url,
            created_at: now,
            updated_at: now,
            author: new_post.author,
            source_url: new_post.source_url,
            is_published: new_post.is_published,
        };
        self.posts.push(post.clone());
        post
    }

    fn newest_first(&self, filter: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.iter().filter(|&p| filter(p)).cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts
    }
}

/// Post store backed by a `Vec` behind an async `RwLock`.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.store.read().await.newest_first(|p| p.is_published))
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.store.read().await.newest_first(|_| true))
    }

    async fn find_published(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .posts
            .iter()
            .find(|p| p.id == id && p.is_published)
            .cloned())
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        Ok(self.store.write().await.insert(post))
    }

    async fn delete(&self, id: i32) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let index = store
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        Ok(store.posts.remove(index))
    }

    async fn toggle_publish(&self, id: i32) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let post = store
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;

        post.updated_at = post.next_revision_time(Utc::now());
        post.is_published = !post.is_published;
        Ok(post.clone())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.store.read().await.posts.len() as u64)
    }

    async fn latest(&self) -> Result<Option<Post>, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .newest_first(|_| true)
            .into_iter()
            .next())
    }

    async fn seed_if_empty(&self, posts: Vec<NewPost>) -> Result<usize, RepoError> {
        let mut store = self.store.write().await;
        if !store.posts.is_empty() {
            return Ok(0);
        }
        let inserted = posts.len();
        for post in posts {
            store.insert(post);
        }
        Ok(inserted)
    }
}
