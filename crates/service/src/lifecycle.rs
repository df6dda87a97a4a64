//! Entity deletion with asset cleanup.
//!
//! Row removal is driven by the schema's referential rules (events and
//! attachments cascade from their plant; plants are detached from a
//! deleted location). The service's job is the part the database cannot
//! do: deleting the stored files, before the rows that reference them go
//! away.

use sqlx::PgPool;

use plantarium_core::error::CoreError;
use plantarium_core::photo_ref::{self, PhotoRef};
use plantarium_core::types::DbId;
use plantarium_db::repositories::{LocationRepo, PlantRepo, TimelineEventRepo};
use plantarium_store::AssetStore;

use crate::error::ServiceResult;

/// Plant deletion with full asset cleanup.
pub struct PlantService;

impl PlantService {
    /// Delete a plant, its timeline events, their attachments, and every
    /// stored file those referenced.
    pub async fn delete(pool: &PgPool, store: &AssetStore, plant_id: DbId) -> ServiceResult<()> {
        let plant = PlantRepo::find_by_id(pool, plant_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Plant",
                id: plant_id,
            })?;

        // Collect every file reachable from this plant before the rows
        // disappear. Legacy references that never got normalized may not
        // live inside the asset store; only canonical ones are ours to
        // remove.
        let mut file_refs = Vec::new();
        if let Some(reference) = plant.photo_ref {
            file_refs.push(reference);
        }
        file_refs.extend(TimelineEventRepo::attachment_refs_by_plant(pool, plant_id).await?);
        for legacy in TimelineEventRepo::legacy_refs_by_plant(pool, plant_id).await? {
            file_refs.extend(canonical_members(&legacy));
        }

        for reference in &file_refs {
            store.delete(reference).await;
        }

        PlantRepo::delete(pool, plant_id).await?;

        tracing::info!(
            plant_id,
            files_removed = file_refs.len(),
            "Deleted plant with its timeline and photos"
        );
        Ok(())
    }
}

/// Location deletion.
pub struct LocationService;

impl LocationService {
    /// Delete a location and its photo file. Plants in the location are
    /// not deleted: the foreign key detaches them (`location_id = NULL`).
    pub async fn delete(pool: &PgPool, store: &AssetStore, location_id: DbId) -> ServiceResult<()> {
        let location = LocationRepo::find_by_id(pool, location_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Location",
                id: location_id,
            })?;

        if let Some(ref reference) = location.photo_ref {
            store.delete(reference).await;
        }
        LocationRepo::delete(pool, location_id).await?;

        tracing::info!(location_id, "Deleted location, plants detached");
        Ok(())
    }
}

/// Canonical references contained in a raw stored value (a canonical
/// string itself, or the canonical members of a comma-joined list).
fn canonical_members(raw: &str) -> Vec<String> {
    match photo_ref::classify(raw) {
        PhotoRef::Canonical(reference) => vec![reference],
        PhotoRef::PathList(parts) => parts
            .into_iter()
            .filter(|part| photo_ref::is_canonical(part))
            .collect(),
        PhotoRef::BareFilename(_) | PhotoRef::RelativePath(_) => Vec::new(),
    }
}
