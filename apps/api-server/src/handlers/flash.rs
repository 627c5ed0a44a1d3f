//! One-shot admin status messages carried across a redirect.
//!
//! The message rides in the redirect's query string, so the admin pages
//! need no session storage.

use actix_web::{HttpResponse, http::header};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

/// A status message to show on the next rendered admin page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    /// `303 See Other` to `path`, carrying this message.
    pub fn redirect(&self, path: &str) -> HttpResponse {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("status", self.kind.as_str())
            .append_pair("message", &self.message)
            .finish();

        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, format!("{path}?{query}")))
            .finish()
    }
}

/// Query parameters an admin page reads its message from.
#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    pub status: Option<String>,
    pub message: Option<String>,
}

impl FlashQuery {
    pub fn into_flash(self) -> Option<Flash> {
        let message = self.message.filter(|m| !m.trim().is_empty())?;
        let kind = match self.status.as_deref() {
            Some("error") => FlashKind::Error,
            _ => FlashKind::Success,
        };
        Some(Flash { kind, message })
    }
}
