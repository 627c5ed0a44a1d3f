//! Server-rendered admin pages.

use askama::Template;
use inbrief_core::domain::Post;

use crate::handlers::flash::Flash;

/// Characters of content shown in the dashboard table.
const PREVIEW_CHARS: usize = 140;

/// Flash banner fields, flattened for the templates.
pub struct FlashBanner {
    pub visible: bool,
    pub kind: &'static str,
    pub message: String,
}

impl From<Option<Flash>> for FlashBanner {
    fn from(flash: Option<Flash>) -> Self {
        match flash {
            Some(flash) => Self {
                visible: true,
                kind: flash.kind.as_str(),
                message: flash.message,
            },
            None => Self {
                visible: false,
                kind: "",
                message: String::new(),
            },
        }
    }
}

/// One dashboard table row.
pub struct PostRow {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub created_at: String,
    pub preview: String,
    pub image_url: String,
    pub source_url: String,
    pub is_published: bool,
    pub status: &'static str,
    pub toggle_label: &'static str,
}

impl From<&Post> for PostRow {
    fn from(post: &Post) -> Self {
        let content = post.content.as_deref().unwrap_or_default();
        let mut preview: String = content.chars().take(PREVIEW_CHARS).collect();
        if content.chars().count() > PREVIEW_CHARS {
            preview.push('…');
        }

        Self {
            id: post.id,
            title: post.title.clone(),
            author: post.author.clone(),
            created_at: post.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            preview,
            image_url: post.image_url.clone().unwrap_or_default(),
            source_url: post.source_url.clone().unwrap_or_default(),
            is_published: post.is_published,
            status: if post.is_published { "Published" } else { "Draft" },
            toggle_label: if post.is_published { "Unpublish" } else { "Publish" },
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub flash: FlashBanner,
    pub posts: Vec<PostRow>,
    pub total: usize,
    pub published: usize,
}

impl DashboardTemplate {
    pub fn new(posts: &[Post], flash: Option<Flash>) -> Self {
        Self {
            flash: flash.into(),
            total: posts.len(),
            published: posts.iter().filter(|p| p.is_published).count(),
            posts: posts.iter().map(PostRow::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "create_post.html")]
pub struct CreatePostTemplate {
    pub flash: FlashBanner,
}
