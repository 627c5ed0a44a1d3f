//! Domain entities - the core business objects.

mod post;
mod samples;

pub use post::{AUTHOR_MAX_LEN, DEFAULT_AUTHOR, NewPost, Post, PostInput, TITLE_MAX_LEN};
pub use samples::sample_posts;
