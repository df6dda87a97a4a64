//! Plant entity models and DTOs.

use chrono::NaiveDate;
use plantarium_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `plants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Plant {
    pub id: DbId,
    pub user_id: DbId,
    pub location_id: Option<DbId>,
    pub name: String,
    pub species: Option<String>,
    pub planted_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub photo_ref: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new plant.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlant {
    pub user_id: DbId,
    pub location_id: Option<DbId>,
    pub name: String,
    pub species: Option<String>,
    pub planted_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub photo_ref: Option<String>,
}

/// DTO for updating an existing plant.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlant {
    pub location_id: Option<DbId>,
    pub name: Option<String>,
    pub species: Option<String>,
    pub planted_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
