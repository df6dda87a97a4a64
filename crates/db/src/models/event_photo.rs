//! Event photo attachment models.

use plantarium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `event_photos` table: one photo bound to one timeline
/// event, with an explicit display position among its siblings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventPhoto {
    pub id: DbId,
    pub event_id: DbId,
    pub file_ref: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for attaching a photo to an event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventPhoto {
    pub event_id: DbId,
    pub file_ref: String,
    pub sort_order: i32,
}
