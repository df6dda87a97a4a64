//! Growth-phase catalog read.

use sqlx::PgPool;

use plantarium_db::models::growth_phase::GrowthPhase;
use plantarium_db::repositories::GrowthPhaseRepo;

use crate::error::ServiceResult;

/// Read access to reference catalogs.
pub struct CatalogService;

impl CatalogService {
    /// The growth-phase catalog in its fixed order.
    pub async fn growth_phases(pool: &PgPool) -> ServiceResult<Vec<GrowthPhase>> {
        Ok(GrowthPhaseRepo::list_ordered(pool).await?)
    }
}
