//! Row shapes used only by the legacy path normalizer.

use plantarium_core::types::DbId;
use sqlx::FromRow;

/// An entity id paired with its non-null stored photo reference.
#[derive(Debug, Clone, FromRow)]
pub struct LegacyPhotoRow {
    pub id: DbId,
    pub photo_ref: String,
}

/// A location id paired with its legacy binary photo column.
#[derive(Debug, Clone, FromRow)]
pub struct LegacyBlobRow {
    pub id: DbId,
    pub photo_data: Vec<u8>,
}
