//! Repository for the `locations` table.
//!
//! Deleting a location never deletes its plants: the `plants.location_id`
//! foreign key is declared `ON DELETE SET NULL`, so dependent plants are
//! detached by the database itself.

use plantarium_core::types::DbId;
use sqlx::PgPool;

use crate::models::legacy::{LegacyBlobRow, LegacyPhotoRow};
use crate::models::location::{CreateLocation, Location, UpdateLocation};

/// Column list for `locations` queries. The legacy `photo_data` blob is
/// deliberately excluded; only the normalizer queries touch it.
const LOCATION_COLUMNS: &str = "\
    id, user_id, name, description, lighting, substrate, \
    photo_ref, created_at, updated_at";

/// Provides CRUD operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location.
    pub async fn create(pool: &PgPool, input: &CreateLocation) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (user_id, name, description, lighting, substrate, photo_ref) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {LOCATION_COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(input.description.as_deref())
            .bind(input.lighting.as_deref())
            .bind(input.substrate.as_deref())
            .bind(input.photo_ref.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Find a location by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {LOCATION_COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's locations ordered by name.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Location>, sqlx::Error> {
        let query =
            format!("SELECT {LOCATION_COLUMNS} FROM locations WHERE user_id = $1 ORDER BY name");
        sqlx::query_as::<_, Location>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update an existing location.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLocation,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "UPDATE locations SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                lighting = COALESCE($4, lighting), \
                substrate = COALESCE($5, substrate), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {LOCATION_COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.description.as_deref())
            .bind(input.lighting.as_deref())
            .bind(input.substrate.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a location. Plants in it survive with `location_id = NULL`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set or clear the singleton photo reference.
    pub async fn set_photo_ref(
        pool: &PgPool,
        id: DbId,
        photo_ref: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE locations SET photo_ref = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(photo_ref)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Normalizer queries
    // -----------------------------------------------------------------------

    /// All locations with a stored string photo reference.
    pub async fn legacy_photo_rows(pool: &PgPool) -> Result<Vec<LegacyPhotoRow>, sqlx::Error> {
        sqlx::query_as::<_, LegacyPhotoRow>(
            "SELECT id, photo_ref FROM locations WHERE photo_ref IS NOT NULL ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    /// Locations still carrying a binary photo blob and no string
    /// reference.
    pub async fn legacy_blob_rows(pool: &PgPool) -> Result<Vec<LegacyBlobRow>, sqlx::Error> {
        sqlx::query_as::<_, LegacyBlobRow>(
            "SELECT id, photo_data FROM locations \
             WHERE photo_ref IS NULL AND photo_data IS NOT NULL ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    /// Record the canonical reference produced from a migrated blob and
    /// drop the blob in the same statement.
    pub async fn replace_blob_with_ref(
        pool: &PgPool,
        id: DbId,
        photo_ref: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE locations SET photo_ref = $2, photo_data = NULL, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(photo_ref)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
