//! Repository for the `timeline_events` table.

use plantarium_core::types::DbId;
use sqlx::PgPool;

use crate::models::event_photo::EventPhoto;
use crate::models::legacy::LegacyPhotoRow;
use crate::models::timeline_event::{CreateTimelineEvent, TimelineEvent};
use crate::repositories::event_photo_repo::EVENT_PHOTO_COLUMNS;

/// Column list for `timeline_events` queries.
const EVENT_COLUMNS: &str = "\
    id, plant_id, kind, event_date, title, description, phase_id, \
    fertilization_type, fertilization_amount, photo_ref, \
    created_at, updated_at";

/// Provides read/write operations for timeline events.
pub struct TimelineEventRepo;

impl TimelineEventRepo {
    /// Insert an event together with its photo attachments in a single
    /// transaction, so a crash can never leave an attachment without its
    /// event or an event missing its declared attachments.
    ///
    /// `photo_refs` must already be stored files; sort positions are
    /// assigned from the slice order, starting at 0.
    pub async fn create_with_photos(
        pool: &PgPool,
        input: &CreateTimelineEvent,
        photo_refs: &[String],
    ) -> Result<(TimelineEvent, Vec<EventPhoto>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let event_query = format!(
            "INSERT INTO timeline_events \
                (plant_id, kind, event_date, title, description, phase_id, \
                 fertilization_type, fertilization_amount) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {EVENT_COLUMNS}"
        );
        let event = sqlx::query_as::<_, TimelineEvent>(&event_query)
            .bind(input.plant_id)
            .bind(&input.kind)
            .bind(input.event_date)
            .bind(&input.title)
            .bind(input.description.as_deref())
            .bind(input.phase_id)
            .bind(input.fertilization_type.as_deref())
            .bind(input.fertilization_amount.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        let photo_query = format!(
            "INSERT INTO event_photos (event_id, file_ref, sort_order) \
             VALUES ($1, $2, $3) \
             RETURNING {EVENT_PHOTO_COLUMNS}"
        );
        let mut photos = Vec::with_capacity(photo_refs.len());
        for (position, file_ref) in photo_refs.iter().enumerate() {
            let photo = sqlx::query_as::<_, EventPhoto>(&photo_query)
                .bind(event.id)
                .bind(file_ref)
                .bind(position as i32)
                .fetch_one(&mut *tx)
                .await?;
            photos.push(photo);
        }

        tx.commit().await?;
        Ok((event, photos))
    }

    /// Find an event by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TimelineEvent>, sqlx::Error> {
        let query = format!("SELECT {EVENT_COLUMNS} FROM timeline_events WHERE id = $1");
        sqlx::query_as::<_, TimelineEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a plant's events newest-first for display.
    pub async fn list_by_plant(
        pool: &PgPool,
        plant_id: DbId,
    ) -> Result<Vec<TimelineEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM timeline_events \
             WHERE plant_id = $1 ORDER BY event_date DESC, id DESC"
        );
        sqlx::query_as::<_, TimelineEvent>(&query)
            .bind(plant_id)
            .fetch_all(pool)
            .await
    }

    /// All growth-phase events of a plant in insertion order; the
    /// duration engine does its own (stable) date sort.
    pub async fn list_phase_events(
        pool: &PgPool,
        plant_id: DbId,
    ) -> Result<Vec<TimelineEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {EVENT_COLUMNS} FROM timeline_events \
             WHERE plant_id = $1 AND kind = 'growth_phase' ORDER BY id"
        );
        sqlx::query_as::<_, TimelineEvent>(&query)
            .bind(plant_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Asset-cleanup queries
    // -----------------------------------------------------------------------

    /// Attachment file references of every event belonging to a plant.
    pub async fn attachment_refs_by_plant(
        pool: &PgPool,
        plant_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT ep.file_ref FROM event_photos ep \
             JOIN timeline_events te ON te.id = ep.event_id \
             WHERE te.plant_id = $1",
        )
        .bind(plant_id)
        .fetch_all(pool)
        .await
    }

    /// Un-migrated legacy photo references of a plant's events.
    pub async fn legacy_refs_by_plant(
        pool: &PgPool,
        plant_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT photo_ref FROM timeline_events \
             WHERE plant_id = $1 AND photo_ref IS NOT NULL",
        )
        .bind(plant_id)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Normalizer queries
    // -----------------------------------------------------------------------

    /// All events still carrying a legacy photo reference.
    pub async fn legacy_photo_rows(pool: &PgPool) -> Result<Vec<LegacyPhotoRow>, sqlx::Error> {
        sqlx::query_as::<_, LegacyPhotoRow>(
            "SELECT id, photo_ref FROM timeline_events \
             WHERE photo_ref IS NOT NULL ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }

    /// Replace an event's legacy reference with ordered attachment rows,
    /// clearing the legacy column in the same transaction.
    pub async fn replace_legacy_with_attachments(
        pool: &PgPool,
        event_id: DbId,
        file_refs: &[String],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        for (position, file_ref) in file_refs.iter().enumerate() {
            sqlx::query("INSERT INTO event_photos (event_id, file_ref, sort_order) VALUES ($1, $2, $3)")
                .bind(event_id)
                .bind(file_ref)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            "UPDATE timeline_events SET photo_ref = NULL, updated_at = NOW() WHERE id = $1",
        )
        .bind(event_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await
    }
}
