//! Repository for the `growth_phases` lookup table.

use plantarium_core::types::DbId;
use sqlx::PgPool;

use crate::models::growth_phase::GrowthPhase;

/// Column list for `growth_phases` queries.
const PHASE_COLUMNS: &str = "id, name, description, sort_order";

/// Read access to the growth-phase catalog (seeded by migration).
pub struct GrowthPhaseRepo;

impl GrowthPhaseRepo {
    /// List the catalog in its fixed order.
    pub async fn list_ordered(pool: &PgPool) -> Result<Vec<GrowthPhase>, sqlx::Error> {
        let query = format!("SELECT {PHASE_COLUMNS} FROM growth_phases ORDER BY sort_order");
        sqlx::query_as::<_, GrowthPhase>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a phase by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GrowthPhase>, sqlx::Error> {
        let query = format!("SELECT {PHASE_COLUMNS} FROM growth_phases WHERE id = $1");
        sqlx::query_as::<_, GrowthPhase>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
