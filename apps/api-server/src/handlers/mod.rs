//! HTTP handlers and route configuration.

mod admin;
pub mod flash;
mod health;
mod meta;
mod news;


use actix_web::{HttpResponse, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::PathConfig::default().error_handler(|_, _| AppError::EndpointNotFound.into()),
    )
    .app_data(
        web::FormConfig::default()
            .limit(admin::MAX_FORM_BYTES)
            .error_handler(|err, _| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _| AppError::BadRequest(err.to_string()).into()),
    )
    .route("/", web::get().to(meta::index))
    .route("/health", web::get().to(health::health_check))
    // Public API for the mobile client
    .service(
        web::scope("/api/news")
            .route("", web::get().to(news::list_news))
            .route("/all", web::get().to(news::list_news))
            .route("/{id:\\d+}", web::get().to(news::get_news)),
    )
    // Admin interface
    .service(
        web::scope("/admin")
            .route("", web::get().to(admin::dashboard))
            .route("/upload-image", web::post().to(admin::upload_image))
            .route("/create", web::get().to(admin::create_form))
            .route("/create", web::post().to(admin::create_post))
            .route("/delete/{id:\\d+}", web::post().to(admin::delete_post))
            .route("/toggle/{id:\\d+}", web::post().to(admin::toggle_post)),
    )
    .default_service(web::to(not_found));
}

async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::EndpointNotFound)
}
