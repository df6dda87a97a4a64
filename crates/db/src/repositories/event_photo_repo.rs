//! Repository for the `event_photos` attachment table.

use plantarium_core::types::DbId;
use sqlx::PgPool;

use crate::models::event_photo::{CreateEventPhoto, EventPhoto};

/// Column list for `event_photos` queries.
pub(crate) const EVENT_PHOTO_COLUMNS: &str =
    "id, event_id, file_ref, sort_order, created_at, updated_at";

/// Provides operations on event photo attachments.
pub struct EventPhotoRepo;

impl EventPhotoRepo {
    /// Insert a single attachment row.
    pub async fn create(pool: &PgPool, input: &CreateEventPhoto) -> Result<EventPhoto, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_photos (event_id, file_ref, sort_order) \
             VALUES ($1, $2, $3) \
             RETURNING {EVENT_PHOTO_COLUMNS}"
        );
        sqlx::query_as::<_, EventPhoto>(&query)
            .bind(input.event_id)
            .bind(&input.file_ref)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Insert a batch of attachment rows in one transaction, assigning
    /// sort positions `first_sort..` in slice order.
    pub async fn create_batch(
        pool: &PgPool,
        event_id: DbId,
        file_refs: &[String],
        first_sort: i32,
    ) -> Result<Vec<EventPhoto>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO event_photos (event_id, file_ref, sort_order) \
             VALUES ($1, $2, $3) \
             RETURNING {EVENT_PHOTO_COLUMNS}"
        );
        let mut photos = Vec::with_capacity(file_refs.len());
        for (offset, file_ref) in file_refs.iter().enumerate() {
            let photo = sqlx::query_as::<_, EventPhoto>(&query)
                .bind(event_id)
                .bind(file_ref)
                .bind(first_sort + offset as i32)
                .fetch_one(&mut *tx)
                .await?;
            photos.push(photo);
        }

        tx.commit().await?;
        Ok(photos)
    }

    /// List an event's attachments in display order.
    pub async fn list_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<EventPhoto>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_PHOTO_COLUMNS} FROM event_photos \
             WHERE event_id = $1 ORDER BY sort_order"
        );
        sqlx::query_as::<_, EventPhoto>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Next free sort position for an event (0 when it has no photos).
    pub async fn next_sort_order(pool: &PgPool, event_id: DbId) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM event_photos WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_one(pool)
        .await
    }

    /// Count attachments across all events (used by tests and reports).
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM event_photos")
            .fetch_one(pool)
            .await
    }
}
