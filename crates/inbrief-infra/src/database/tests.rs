use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Transaction, Value};

use inbrief_core::domain::{NewPost, sample_posts};
use inbrief_core::error::RepoError;
use inbrief_core::ports::PostRepository;

use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;

/// Logged statements as plain SQL text.
fn sql_of(log: &[Transaction]) -> String {
    format!("{log:?}").replace("\\\"", "\"")
}

fn model(id: i32, title: &str, is_published: bool) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: title.to_owned(),
        content: Some("Content".to_owned()),
        image_url: None,
        created_at: now.into(),
        updated_at: now.into(),
        author: "Admin".to_owned(),
        source_url: None,
        is_published,
    }
}

/// Row returned by a `COUNT(*)` query.
fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

fn disk_full() -> DbErr {
    DbErr::Custom("disk full".to_owned())
}

#[tokio::test]
async fn find_published_maps_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(3, "Test Post", true)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = repo.find_published(3).await.unwrap().unwrap();

    assert_eq!(post.id, 3);
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.content.as_deref(), Some("Content"));
    assert!(post.is_published);
}

#[tokio::test]
async fn find_published_filters_on_flag() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(repo.find_published(9).await.unwrap().is_none());

    let sql = sql_of(&repo.db.into_transaction_log());
    assert!(sql.contains(r#""news_posts"."is_published" = $2"#), "{sql}");
}

#[tokio::test]
async fn list_published_orders_newest_first() {
    let newer = model(2, "Newer", true);
    let mut older = model(1, "Older", true);
    older.created_at = (Utc::now() - Duration::hours(1)).into();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![newer, older]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let posts = repo.list_published().await.unwrap();
    assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), [2, 1]);

    let sql = sql_of(&repo.db.into_transaction_log());
    assert!(
        sql.contains(r#"ORDER BY "news_posts"."created_at" DESC, "news_posts"."id" DESC"#),
        "{sql}"
    );
}

#[tokio::test]
async fn create_commits_inserted_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(11, "Fresh", true)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let created = repo
        .create(NewPost::published("Fresh", "Content", "Admin"))
        .await
        .unwrap();
    assert_eq!(created.id, 11);

    let log = repo.db.into_transaction_log();
    assert_eq!(log.len(), 1);
    let sql = sql_of(&log);
    assert!(sql.contains("BEGIN"), "{sql}");
    assert!(sql.contains(r#"INSERT INTO "news_posts""#), "{sql}");
    assert!(sql.contains("COMMIT"), "{sql}");
}

#[tokio::test]
async fn toggle_flips_flag_inside_transaction() {
    let original = model(5, "Toggle me", true);
    let mut flipped = original.clone();
    flipped.is_published = false;
    flipped.updated_at = (Utc::now() + Duration::seconds(1)).into();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![original.clone()], vec![flipped]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = repo.toggle_publish(5).await.unwrap();
    assert!(!post.is_published);
    assert!(post.updated_at > original.updated_at);

    let sql = sql_of(&repo.db.into_transaction_log());
    assert!(sql.contains("FOR UPDATE"), "{sql}");
    assert!(sql.contains(r#"UPDATE "news_posts""#), "{sql}");
    assert!(sql.contains("COMMIT"), "{sql}");
}

#[tokio::test]
async fn toggle_missing_row_rolls_back() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(matches!(repo.toggle_publish(404).await, Err(RepoError::NotFound)));

    let sql = sql_of(&repo.db.into_transaction_log());
    assert!(!sql.contains(r#"UPDATE "news_posts""#), "{sql}");
    assert!(!sql.contains("COMMIT"), "{sql}");
}

#[tokio::test]
async fn delete_returns_removed_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(8, "Gone", true)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let deleted = repo.delete(8).await.unwrap();
    assert_eq!(deleted.title, "Gone");

    let sql = sql_of(&repo.db.into_transaction_log());
    assert!(sql.contains(r#"DELETE FROM "news_posts""#), "{sql}");
}

#[tokio::test]
async fn delete_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(matches!(repo.delete(1).await, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn failed_insert_rolls_back() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([disk_full()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let err = repo
        .create(NewPost::published("Fresh", "Content", "Admin"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Query(ref msg) if msg.contains("disk full")));

    let sql = sql_of(&repo.db.into_transaction_log());
    assert!(sql.contains("ROLLBACK"), "{sql}");
    assert!(!sql.contains("COMMIT"), "{sql}");
}

#[tokio::test]
async fn failed_toggle_update_rolls_back() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(5, "Toggle me", true)]])
        .append_query_errors([disk_full()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(matches!(
        repo.toggle_publish(5).await,
        Err(RepoError::Query(_))
    ));

    let sql = sql_of(&repo.db.into_transaction_log());
    assert!(sql.contains(r#"UPDATE "news_posts""#), "{sql}");
    assert!(sql.contains("ROLLBACK"), "{sql}");
    assert!(!sql.contains("COMMIT"), "{sql}");
}

#[tokio::test]
async fn failed_delete_rolls_back() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(8, "Keep me", true)]])
        .append_exec_errors([disk_full()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(matches!(repo.delete(8).await, Err(RepoError::Query(_))));

    let sql = sql_of(&repo.db.into_transaction_log());
    assert!(sql.contains(r#"DELETE FROM "news_posts""#), "{sql}");
    assert!(sql.contains("ROLLBACK"), "{sql}");
    assert!(!sql.contains("COMMIT"), "{sql}");
}

#[tokio::test]
async fn seed_skips_populated_table() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(3)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert_eq!(repo.seed_if_empty(sample_posts()).await.unwrap(), 0);

    let sql = sql_of(&repo.db.into_transaction_log());
    assert!(!sql.contains("INSERT INTO"), "{sql}");
}

#[tokio::test]
async fn seed_inserts_samples_in_one_transaction() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row(0)]])
        .append_query_results([
            vec![model(1, "Welcome", true)],
            vec![model(2, "Dashboard", true)],
            vec![model(3, "Mobile", true)],
            vec![model(4, "Persistence", true)],
        ])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert_eq!(repo.seed_if_empty(sample_posts()).await.unwrap(), 4);

    let log = repo.db.into_transaction_log();
    assert_eq!(log.len(), 1);
    let sql = sql_of(&log);
    assert_eq!(sql.matches(r#"INSERT INTO "news_posts""#).count(), 4, "{sql}");
    assert_eq!(sql.matches("COMMIT").count(), 1, "{sql}");
}
