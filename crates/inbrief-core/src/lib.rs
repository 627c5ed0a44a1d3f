//! # InBrief Core
//!
//! The domain layer of the InBrief news service.
//! This crate contains the post model, its validation rules and the ports
//! that infrastructure must implement. It has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::{NewsService, StoreStats};
