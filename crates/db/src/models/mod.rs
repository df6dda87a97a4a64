//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) where patching is
//!   supported

pub mod event_photo;
pub mod growth_phase;
pub mod legacy;
pub mod location;
pub mod plant;
pub mod timeline_event;
pub mod user;
