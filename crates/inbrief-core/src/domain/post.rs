use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Author recorded when the admin leaves the field blank.
pub const DEFAULT_AUTHOR: &str = "Admin";

/// Column bound for `title`.
pub const TITLE_MAX_LEN: usize = 500;

/// Column bound for `author`.
pub const AUTHOR_MAX_LEN: usize = 200;

/// Post entity - one news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: String,
    pub source_url: Option<String>,
    pub is_published: bool,
}

impl Post {
    /// Timestamp for the next mutation of this post.
    ///
    /// Always strictly after `updated_at`, even when the wall clock has not
    /// advanced past the store's microsecond resolution.
    pub fn next_revision_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let floor = self.updated_at + Duration::microseconds(1);
        if now > floor { now } else { floor }
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_published {
            "published"
        } else {
            "unpublished"
        }
    }
}

/// Raw post fields as submitted by the admin form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostInput {
    pub title: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub author: Option<String>,
    pub source_url: Option<String>,
}

/// A validated post ready to be inserted. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub author: String,
    pub source_url: Option<String>,
    pub is_published: bool,
}

impl NewPost {
    /// Normalize and validate submitted fields.
    pub fn from_input(input: PostInput) -> Result<Self, DomainError> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::Validation("Title is required!".to_string()));
        }
        if title.chars().count() > TITLE_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "Title must be at most {TITLE_MAX_LEN} characters"
            )));
        }

        let author = non_empty(input.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
        if author.chars().count() > AUTHOR_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "Author must be at most {AUTHOR_MAX_LEN} characters"
            )));
        }

        Ok(Self {
            title,
            content: non_empty(input.content),
            image_url: non_empty(input.image_url),
            author,
            source_url: non_empty(input.source_url),
            is_published: true,
        })
    }

    /// Build a published post without going through form normalization.
    pub fn published(title: &str, content: &str, author: &str) -> Self {
        Self {
            title: title.to_string(),
            content: Some(content.to_string()),
            image_url: None,
            author: author.to_string(),
            source_url: None,
            is_published: true,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> PostInput {
        PostInput {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn title_only_gets_defaults() {
        let post = NewPost::from_input(input("  Breaking  ")).unwrap();
        assert_eq!(post.title, "Breaking");
        assert_eq!(post.author, DEFAULT_AUTHOR);
        assert!(post.is_published);
        assert_eq!(post.content, None);
        assert_eq!(post.image_url, None);
        assert_eq!(post.source_url, None);
    }

    #[test]
    fn blank_title_is_rejected() {
        for title in ["", "   ", "\t\n"] {
            let err = NewPost::from_input(input(title)).unwrap_err();
            assert!(matches!(err, DomainError::Validation(ref msg) if msg == "Title is required!"));
        }
    }

    #[test]
    fn empty_urls_normalize_to_none() {
        let post = NewPost::from_input(PostInput {
            title: "T".to_string(),
            content: Some("body".to_string()),
            image_url: Some("".to_string()),
            author: Some("  ".to_string()),
            source_url: Some(" https://example.com/a ".to_string()),
        })
        .unwrap();

        assert_eq!(post.image_url, None);
        assert_eq!(post.author, DEFAULT_AUTHOR);
        assert_eq!(post.source_url.as_deref(), Some("https://example.com/a"));
        assert_eq!(post.content.as_deref(), Some("body"));
    }

    #[test]
    fn oversized_title_is_rejected() {
        let long = "x".repeat(TITLE_MAX_LEN + 1);
        assert!(matches!(
            NewPost::from_input(input(&long)),
            Err(DomainError::Validation(_))
        ));
        assert!(NewPost::from_input(input(&"x".repeat(TITLE_MAX_LEN))).is_ok());
    }

    #[test]
    fn next_revision_time_is_strictly_later() {
        let now = Utc::now();
        let post = Post {
            id: 1,
            title: "T".to_string(),
            content: None,
            image_url: None,
            created_at: now,
            updated_at: now,
            author: DEFAULT_AUTHOR.to_string(),
            source_url: None,
            is_published: true,
        };

        assert!(post.next_revision_time(now) > post.updated_at);
        assert!(post.next_revision_time(now - Duration::seconds(5)) > post.updated_at);

        let later = now + Duration::seconds(1);
        assert_eq!(post.next_revision_time(later), later);
    }
}
