//! Timeline event entity models and DTOs.

use chrono::NaiveDate;
use plantarium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `timeline_events` table.
///
/// `photo_ref` is the legacy single-reference column (bare filename,
/// relative path, or comma-joined list); canonical photo storage for
/// events is the `event_photos` table. New rows are written with
/// `photo_ref = NULL` and the normalizer drains the survivors.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimelineEvent {
    pub id: DbId,
    pub plant_id: DbId,
    pub kind: String,
    pub event_date: NaiveDate,
    pub title: String,
    pub description: Option<String>,
    pub phase_id: Option<DbId>,
    pub fertilization_type: Option<String>,
    pub fertilization_amount: Option<String>,
    pub photo_ref: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new timeline event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimelineEvent {
    pub plant_id: DbId,
    pub kind: String,
    pub event_date: NaiveDate,
    pub title: String,
    pub description: Option<String>,
    pub phase_id: Option<DbId>,
    pub fertilization_type: Option<String>,
    pub fertilization_amount: Option<String>,
}
