//! # InBrief Infrastructure
//!
//! Concrete implementations of the ports defined in `inbrief-core`:
//! the post store and the media host client.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL post store via SeaORM
//! - `minimal` - in-memory post store only

pub mod database;
pub mod media;

pub use database::{DatabaseConfig, InMemoryPostRepository};
pub use media::{CloudinaryConfig, CloudinaryUploader, DisabledUploader};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostRepository};
