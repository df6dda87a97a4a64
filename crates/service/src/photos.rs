//! Singleton photo replace/delete for plants and locations.
//!
//! A plant's or location's photo reference points to at most one stored
//! file; replacing it removes the previously referenced file before the
//! new reference is persisted, so orphans cannot accumulate.

use sqlx::PgPool;

use plantarium_core::category::PhotoCategory;
use plantarium_core::error::CoreError;
use plantarium_core::types::DbId;
use plantarium_db::repositories::{LocationRepo, PlantRepo};
use plantarium_store::AssetStore;

use crate::error::ServiceResult;
use crate::events::PhotoUpload;

/// Outcome of a photo replace/delete: the new reference (if any) and a
/// warning when the upload was rejected.
pub type PhotoChange = (Option<String>, Option<String>);

/// Singleton photo operations for plants and locations.
pub struct PhotoService;

impl PhotoService {
    /// Replace or delete a plant's photo.
    ///
    /// With an upload, the new file is stored, the old file deleted, and
    /// the new reference persisted; a rejected upload changes nothing and
    /// returns a warning with the unchanged reference. With `None`, the
    /// existing file and reference are removed.
    pub async fn set_plant_photo(
        pool: &PgPool,
        store: &AssetStore,
        plant_id: DbId,
        upload: Option<PhotoUpload>,
    ) -> ServiceResult<PhotoChange> {
        let plant = PlantRepo::find_by_id(pool, plant_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Plant",
                id: plant_id,
            })?;

        let change = replace_singleton(
            store,
            plant.photo_ref,
            upload,
            PhotoCategory::Plant,
        )
        .await?;
        if let Applied::Changed(ref new_ref) = change {
            PlantRepo::set_photo_ref(pool, plant_id, new_ref.as_deref()).await?;
        }
        Ok(change.into_result())
    }

    /// Replace or delete a location's photo. Same contract as
    /// [`PhotoService::set_plant_photo`].
    pub async fn set_location_photo(
        pool: &PgPool,
        store: &AssetStore,
        location_id: DbId,
        upload: Option<PhotoUpload>,
    ) -> ServiceResult<PhotoChange> {
        let location = LocationRepo::find_by_id(pool, location_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Location",
                id: location_id,
            })?;

        let change = replace_singleton(
            store,
            location.photo_ref,
            upload,
            PhotoCategory::Location,
        )
        .await?;
        if let Applied::Changed(ref new_ref) = change {
            LocationRepo::set_photo_ref(pool, location_id, new_ref.as_deref()).await?;
        }
        Ok(change.into_result())
    }
}

/// What a replace attempt did to the singleton reference.
enum Applied {
    /// Reference should be updated to this value (possibly `None`).
    Changed(Option<String>),
    /// Upload was rejected; row untouched, old reference kept.
    Rejected { kept: Option<String>, warning: String },
}

impl Applied {
    fn into_result(self) -> PhotoChange {
        match self {
            Self::Changed(new_ref) => (new_ref, None),
            Self::Rejected { kept, warning } => (kept, Some(warning)),
        }
    }
}

/// Shared replace/delete logic for singleton photo references.
async fn replace_singleton(
    store: &AssetStore,
    current: Option<String>,
    upload: Option<PhotoUpload>,
    category: PhotoCategory,
) -> ServiceResult<Applied> {
    let Some(upload) = upload else {
        // Delete: drop the file (best-effort) and clear the reference.
        if let Some(ref reference) = current {
            store.delete(reference).await;
        }
        return Ok(Applied::Changed(None));
    };

    match store.store(&upload.filename, &upload.bytes, category).await {
        Ok(new_ref) => {
            if let Some(ref old_ref) = current {
                store.delete(old_ref).await;
            }
            Ok(Applied::Changed(Some(new_ref)))
        }
        Err(err) if err.is_rejection() => Ok(Applied::Rejected {
            kept: current,
            warning: err.to_string(),
        }),
        Err(err) => Err(err.into()),
    }
}
