//! PostgreSQL post repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, IntoActiveModel, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};

use inbrief_core::domain::{NewPost, Post};
use inbrief_core::error::RepoError;
use inbrief_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};

/// Post repository over a pooled SeaORM connection.
///
/// Writes run in a transaction that is committed only after the row change
/// succeeds; an early return drops the transaction, which rolls it back.
pub struct PostgresPostRepository {
    pub(crate) db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn newest_first(select: Select<PostEntity>) -> Select<PostEntity> {
        select
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
    }

    fn active_model(new_post: NewPost) -> post::ActiveModel {
        let now = Utc::now();
        post::ActiveModel {
            id: NotSet,
            title: Set(new_post.title),
            content: Set(new_post.content),
            image_url: Set(new_post.image_url),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            author: Set(new_post.author),
            source_url: Set(new_post.source_url),
            is_published: Set(new_post.is_published),
        }
    }
}

fn db_error(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        DbErr::RecordNotFound(_) => RepoError::NotFound,
        other => RepoError::Query(other.to_string()),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        let rows = Self::newest_first(
            PostEntity::find().filter(post::Column::IsPublished.eq(true)),
        )
        .all(&self.db)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let rows = Self::newest_first(PostEntity::find())
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_published(&self, id: i32) -> Result<Option<Post>, RepoError> {
        tracing::debug!(post_id = id, "Finding published post");

        let row = PostEntity::find_by_id(id)
            .filter(post::Column::IsPublished.eq(true))
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let model = Self::active_model(new_post)
            .insert(&txn)
            .await
            .map_err(db_error)?;

        txn.commit().await.map_err(db_error)?;
        tracing::debug!(post_id = model.id, "Inserted post");

        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let model = PostEntity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(RepoError::NotFound)?;

        let result = PostEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_error)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(db_error)?;
        tracing::debug!(post_id = id, "Deleted post");

        Ok(model.into())
    }

    async fn toggle_publish(&self, id: i32) -> Result<Post, RepoError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        // SELECT ... FOR UPDATE keeps concurrent toggles of one row serialized.
        let model = PostEntity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(RepoError::NotFound)?;

        let current: Post = model.clone().into();
        let mut active = model.into_active_model();
        active.is_published = Set(!current.is_published);
        active.updated_at = Set(current.next_revision_time(Utc::now()).into());

        let updated = active.update(&txn).await.map_err(db_error)?;
        txn.commit().await.map_err(db_error)?;
        tracing::debug!(post_id = id, is_published = updated.is_published, "Toggled post");

        Ok(updated.into())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find().count(&self.db).await.map_err(db_error)
    }

    async fn latest(&self) -> Result<Option<Post>, RepoError> {
        let row = Self::newest_first(PostEntity::find())
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn seed_if_empty(&self, posts: Vec<NewPost>) -> Result<usize, RepoError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let existing = PostEntity::find().count(&txn).await.map_err(db_error)?;
        if existing > 0 {
            tracing::debug!(existing, "Store already holds posts, skipping seed");
            return Ok(0);
        }

        let inserted = posts.len();
        for new_post in posts {
            Self::active_model(new_post)
                .insert(&txn)
                .await
                .map_err(db_error)?;
        }

        txn.commit().await.map_err(db_error)?;
        Ok(inserted)
    }
}
