//! Growth-phase catalog model.
//!
//! Read-mostly reference data seeded by migration; never created or
//! edited by end users.

use plantarium_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `growth_phases` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GrowthPhase {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i32,
}
