//! Public read endpoints for the mobile client.

use actix_web::{HttpResponse, web};
use inbrief_shared::{NewsItemResponse, NewsListResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Published posts, newest first.
///
/// GET /api/news and GET /api/news/all
pub async fn list_news(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.news.list_published().await?;
    tracing::debug!(count = posts.len(), "Listing published posts");
    Ok(HttpResponse::Ok().json(NewsListResponse::ok(posts)))
}

/// GET /api/news/{id}
pub async fn get_news(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = state.news.get_published(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(NewsItemResponse::ok(post)))
}
