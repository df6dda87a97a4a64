//! Repository for the `plants` table.

use plantarium_core::types::DbId;
use sqlx::PgPool;

use crate::models::legacy::LegacyPhotoRow;
use crate::models::plant::{CreatePlant, Plant, UpdatePlant};

/// Column list for `plants` queries.
const PLANT_COLUMNS: &str = "\
    id, user_id, location_id, name, species, planted_date, notes, \
    photo_ref, created_at, updated_at";

/// Provides CRUD operations for plants.
pub struct PlantRepo;

impl PlantRepo {
    /// Insert a new plant.
    pub async fn create(pool: &PgPool, input: &CreatePlant) -> Result<Plant, sqlx::Error> {
        let query = format!(
            "INSERT INTO plants \
                (user_id, location_id, name, species, planted_date, notes, photo_ref) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {PLANT_COLUMNS}"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(input.user_id)
            .bind(input.location_id)
            .bind(&input.name)
            .bind(input.species.as_deref())
            .bind(input.planted_date)
            .bind(input.notes.as_deref())
            .bind(input.photo_ref.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Find a plant by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!("SELECT {PLANT_COLUMNS} FROM plants WHERE id = $1");
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's plants ordered by name.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Plant>, sqlx::Error> {
        let query = format!("SELECT {PLANT_COLUMNS} FROM plants WHERE user_id = $1 ORDER BY name");
        sqlx::query_as::<_, Plant>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List the plants in a location ordered by name.
    pub async fn list_by_location(
        pool: &PgPool,
        location_id: DbId,
    ) -> Result<Vec<Plant>, sqlx::Error> {
        let query =
            format!("SELECT {PLANT_COLUMNS} FROM plants WHERE location_id = $1 ORDER BY name");
        sqlx::query_as::<_, Plant>(&query)
            .bind(location_id)
            .fetch_all(pool)
            .await
    }

    /// Update an existing plant.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlant,
    ) -> Result<Option<Plant>, sqlx::Error> {
        let query = format!(
            "UPDATE plants SET \
                location_id = COALESCE($2, location_id), \
                name = COALESCE($3, name), \
                species = COALESCE($4, species), \
                planted_date = COALESCE($5, planted_date), \
                notes = COALESCE($6, notes), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {PLANT_COLUMNS}"
        );
        sqlx::query_as::<_, Plant>(&query)
            .bind(id)
            .bind(input.location_id)
            .bind(input.name.as_deref())
            .bind(input.species.as_deref())
            .bind(input.planted_date)
            .bind(input.notes.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a plant. Its timeline events and their attachment rows go
    /// with it via `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM plants WHERE id = $1")
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
            sqlx::query("UPDATE plants SET photo_ref = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(photo_ref)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All plants with a stored photo reference, for the normalizer.
    pub async fn legacy_photo_rows(pool: &PgPool) -> Result<Vec<LegacyPhotoRow>, sqlx::Error> {
        sqlx::query_as::<_, LegacyPhotoRow>(
            "SELECT id, photo_ref FROM plants WHERE photo_ref IS NOT NULL ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }
}
