//! Location entity models and DTOs.

use plantarium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `locations` table.
///
/// The legacy `photo_data` blob column is intentionally absent here: it
/// is only ever read by the path normalizer through a dedicated query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub lighting: Option<String>,
    pub substrate: Option<String>,
    pub photo_ref: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new location.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocation {
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub lighting: Option<String>,
    pub substrate: Option<String>,
    pub photo_ref: Option<String>,
}

/// DTO for updating an existing location.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLocation {
    pub name: Option<String>,
    pub description: Option<String>,
    pub lighting: Option<String>,
    pub substrate: Option<String>,
}
