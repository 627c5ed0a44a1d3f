//! Service metadata at the root path.

use actix_web::HttpResponse;
use serde_json::json;

/// GET /
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "app": "InBrief News API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "healthy",
        "endpoints": {
            "news": "/api/news",
            "all_news": "/api/news/all",
            "single_news": "/api/news/<id>",
            "health": "/health",
            "admin": "/admin",
            "create_post": "/admin/create",
            "upload_image": "/admin/upload-image",
        },
        "cors": "enabled",
    }))
}
