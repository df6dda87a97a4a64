//! Contract surface of the plant-care tracker core.
//!
//! The (out-of-scope) web layer calls into this crate: it stores uploads
//! through the asset store, records timeline events and their photo
//! attachments, computes growth timelines, and runs the legacy photo-path
//! normalizer. Every operation is synchronous-per-request: it runs to
//! completion within the calling invocation, suspending only on ordinary
//! blocking I/O.

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod normalizer;
pub mod photos;

pub use error::{ServiceError, ServiceResult};
