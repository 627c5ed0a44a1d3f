//! Admin interface: HTML pages plus form actions that redirect back with a
//! status message.

use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use askama::Template;
use futures::TryStreamExt;
use inbrief_core::DomainError;
use inbrief_core::domain::PostInput;
use inbrief_core::ports::ImageUpload;
use inbrief_shared::dto::{CreatePostForm, UploadImageResponse};

use super::flash::{Flash, FlashQuery};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::{CreatePostTemplate, DashboardTemplate};

const DASHBOARD: &str = "/admin";
const CREATE_FORM: &str = "/admin/create";

const NO_IMAGE_PROVIDED: &str = "No image file provided";

/// Largest image accepted for upload.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Largest urlencoded admin form body; article content can be long.
pub const MAX_FORM_BYTES: usize = 2 * 1024 * 1024;

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// GET /admin
pub async fn dashboard(
    state: web::Data<AppState>,
    query: web::Query<FlashQuery>,
) -> AppResult<HttpResponse> {
    let posts = match state.news.list_all().await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::error!("Dashboard could not load posts: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(format!("Database error: {e}")));
        }
    };

    let page = DashboardTemplate::new(&posts, query.into_inner().into_flash()).render()?;
    Ok(html(page))
}

/// GET /admin/create
pub async fn create_form(query: web::Query<FlashQuery>) -> AppResult<HttpResponse> {
    let page = CreatePostTemplate {
        flash: query.into_inner().into_flash().into(),
    }
    .render()?;
    Ok(html(page))
}

/// POST /admin/create
pub async fn create_post(
    state: web::Data<AppState>,
    form: web::Form<CreatePostForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let input = PostInput {
        title: form.title,
        content: form.content,
        image_url: form.image_url,
        author: form.author,
        source_url: form.source_url,
    };

    match state.news.create(input).await {
        Ok(post) => {
            Flash::success(format!("Post \"{}\" created successfully!", post.title))
                .redirect(DASHBOARD)
        }
        Err(DomainError::Validation(message)) => Flash::error(message).redirect(CREATE_FORM),
        Err(e) => {
            tracing::error!("Error creating post: {}", e);
            Flash::error(format!("Error creating post: {e}")).redirect(CREATE_FORM)
        }
    }
}

/// POST /admin/delete/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> AppResult<HttpResponse> {
    match state.news.delete(id.into_inner()).await {
        Ok(post) => Ok(
            Flash::success(format!("Post \"{}\" deleted successfully!", post.title))
                .redirect(DASHBOARD),
        ),
        Err(DomainError::NotFound { .. }) => Err(AppError::PostNotFound),
        Err(e) => {
            tracing::error!("Error deleting post: {}", e);
            Ok(Flash::error(format!("Error deleting post: {e}")).redirect(DASHBOARD))
        }
    }
}

/// POST /admin/toggle/{id}
pub async fn toggle_post(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> AppResult<HttpResponse> {
    match state.news.toggle_publish(id.into_inner()).await {
        Ok(post) => {
            let action = if post.is_published {
                "published"
            } else {
                "unpublished"
            };
            Ok(
                Flash::success(format!("Post \"{}\" {action} successfully!", post.title))
                    .redirect(DASHBOARD),
            )
        }
        Err(DomainError::NotFound { .. }) => Err(AppError::PostNotFound),
        Err(e) => {
            tracing::error!("Error updating post: {}", e);
            Ok(Flash::error(format!("Error updating post: {e}")).redirect(DASHBOARD))
        }
    }
}

/// POST /admin/upload-image
///
/// Expects a multipart body with an `image` file part. Other parts are
/// drained and ignored.
pub async fn upload_image(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let mut image = None;

    while let Some(field) = payload.try_next().await.map_err(not_multipart)? {
        if field.name() == Some("image") && image.is_none() {
            image = Some(read_image(field, &state.upload_folder).await?);
        } else {
            drain(field).await?;
        }
    }

    let image = image.ok_or_else(|| AppError::BadRequest(NO_IMAGE_PROVIDED.to_string()))?;
    if image.filename.is_empty() {
        return Err(AppError::BadRequest("No image selected".to_string()));
    }

    let uploaded = state.uploader.upload(image).await?;

    Ok(HttpResponse::Ok().json(UploadImageResponse {
        success: true,
        image_url: uploaded.secure_url,
        public_id: uploaded.public_id,
    }))
}

async fn read_image(mut field: Field, folder: &str) -> AppResult<ImageUpload> {
    let filename = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or_default()
        .trim()
        .to_string();
    let content_type = field.content_type().map(|mime| mime.to_string());

    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
        if bytes.len() + chunk.len() > MAX_IMAGE_BYTES {
            return Err(AppError::BadRequest(format!(
                "Image exceeds the {} MiB limit",
                MAX_IMAGE_BYTES / (1024 * 1024)
            )));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(ImageUpload {
        bytes,
        filename,
        content_type,
        folder: folder.to_string(),
    })
}

async fn drain(mut field: Field) -> AppResult<()> {
    while field.try_next().await.map_err(bad_multipart)?.is_some() {}
    Ok(())
}

/// A body that is not multipart at all carries no image file.
fn not_multipart(err: actix_multipart::MultipartError) -> AppError {
    use actix_multipart::MultipartError;

    match err {
        MultipartError::ContentTypeMissing { .. }
        | MultipartError::ContentTypeParse { .. }
        | MultipartError::ContentTypeIncompatible { .. } => {
            AppError::BadRequest(NO_IMAGE_PROVIDED.to_string())
        }
        other => bad_multipart(other),
    }
}

fn bad_multipart(err: actix_multipart::MultipartError) -> AppError {
    AppError::BadRequest(format!("Invalid multipart body: {err}"))
}
