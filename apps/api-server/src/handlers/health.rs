//! Health check endpoint.

use actix_web::{HttpResponse, web};
use inbrief_shared::dto::{HealthResponse, UnhealthyResponse};

use crate::state::AppState;

/// Health check endpoint - queries the store and reports what it found.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();

    match state.news.stats().await {
        Ok(stats) => HttpResponse::Ok().json(HealthResponse {
            status: "healthy".to_string(),
            database: "connected".to_string(),
            total_posts: stats.total_posts,
            latest_post_id: stats.latest_post_id,
            timestamp,
        }),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            HttpResponse::InternalServerError().json(UnhealthyResponse {
                status: "unhealthy".to_string(),
                error: e.to_string(),
                timestamp,
            })
        }
    }
}
