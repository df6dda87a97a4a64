//! Timeline event creation and reads.
//!
//! Event creation is the one operation with several moving parts: upload
//! storage (with per-file rejection warnings), kind-specific field
//! coercion, title derivation, and a single transaction covering the
//! event row plus its attachment rows.

use chrono::NaiveDate;
use sqlx::PgPool;

use plantarium_core::category::PhotoCategory;
use plantarium_core::error::CoreError;
use plantarium_core::event::{self, EventKind};
use plantarium_core::growth::{self, PhaseInterval};
use plantarium_core::types::DbId;
use plantarium_db::models::event_photo::EventPhoto;
use plantarium_db::models::timeline_event::{CreateTimelineEvent, TimelineEvent};
use plantarium_db::repositories::{
    EventPhotoRepo, GrowthPhaseRepo, PlantRepo, TimelineEventRepo,
};
use plantarium_store::AssetStore;

use crate::error::ServiceResult;

/// An uploaded photo: original file name plus payload.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Request to record a new timeline event, as received from the web
/// layer. `event_date` stays a string because the fallback title embeds
/// it literally as submitted; `phase` is the raw form value and may be
/// empty or garbage.
#[derive(Debug, Clone)]
pub struct NewTimelineEvent {
    pub plant_id: DbId,
    pub kind: String,
    pub event_date: String,
    pub description: String,
    pub phase: Option<String>,
    pub fertilization_type: Option<String>,
    pub fertilization_amount: Option<String>,
    pub photos: Vec<PhotoUpload>,
}

/// Result of recording an event: the row, its attachments in order, and
/// one warning per rejected upload.
#[derive(Debug)]
pub struct CreatedEvent {
    pub event: TimelineEvent,
    pub photos: Vec<EventPhoto>,
    pub warnings: Vec<String>,
}

/// Timeline event operations.
pub struct EventService;

impl EventService {
    /// Record a timeline event with zero or more photo attachments.
    ///
    /// Rejected uploads (bad extension, empty file) are skipped with a
    /// warning and do not abort the rest of the submission. A storage
    /// I/O failure is fatal: files already written for the batch are
    /// cleaned up best-effort and nothing is committed.
    pub async fn create_event(
        pool: &PgPool,
        store: &AssetStore,
        input: NewTimelineEvent,
    ) -> ServiceResult<CreatedEvent> {
        let plant = PlantRepo::find_by_id(pool, input.plant_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Plant",
                id: input.plant_id,
            })?;

        let event_date = parse_event_date(&input.event_date)?;
        let kind = EventKind::parse(&input.kind);
        let title = event::derive_title(&kind, &input.event_date, &input.description);

        // Kind-specific fields; other kinds store only the common ones.
        let mut phase_id = None;
        let mut fertilization_type = None;
        let mut fertilization_amount = None;
        match kind {
            EventKind::GrowthPhase => {
                phase_id = event::parse_phase_ref(input.phase.as_deref());
                if let Some(id) = phase_id {
                    // A phase id outside the catalog degrades to "no phase".
                    if GrowthPhaseRepo::find_by_id(pool, id).await?.is_none() {
                        tracing::warn!(phase_id = id, "Unknown growth phase, storing event without one");
                        phase_id = None;
                    }
                }
            }
            EventKind::Fertilization => {
                fertilization_type = input.fertilization_type.clone();
                fertilization_amount =
                    event::normalize_amount(input.fertilization_amount.as_deref());
            }
            _ => {}
        }

        let (file_refs, warnings) = store_batch(store, &input.photos).await?;

        let create = CreateTimelineEvent {
            plant_id: plant.id,
            kind: kind.as_str().to_string(),
            event_date,
            title,
            description: Some(input.description).filter(|d| !d.is_empty()),
            phase_id,
            fertilization_type,
            fertilization_amount,
        };

        let (event, photos) =
            TimelineEventRepo::create_with_photos(pool, &create, &file_refs).await?;

        tracing::info!(
            event_id = event.id,
            plant_id = plant.id,
            kind = %event.kind,
            photo_count = photos.len(),
            "Recorded timeline event"
        );

        Ok(CreatedEvent {
            event,
            photos,
            warnings,
        })
    }

    /// Append photos to an existing event's attachment ledger.
    ///
    /// Sort positions continue after the event's current attachments;
    /// files submitted together keep their submission order.
    pub async fn attach_photos(
        pool: &PgPool,
        store: &AssetStore,
        event_id: DbId,
        uploads: &[PhotoUpload],
    ) -> ServiceResult<(Vec<EventPhoto>, Vec<String>)> {
        TimelineEventRepo::find_by_id(pool, event_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "TimelineEvent",
                id: event_id,
            })?;

        let (file_refs, warnings) = store_batch(store, uploads).await?;
        let first_sort = EventPhotoRepo::next_sort_order(pool, event_id).await?;
        let photos = EventPhotoRepo::create_batch(pool, event_id, &file_refs, first_sort).await?;

        Ok((photos, warnings))
    }

    /// A plant's full timeline, newest-first for display.
    pub async fn timeline(pool: &PgPool, plant_id: DbId) -> ServiceResult<Vec<TimelineEvent>> {
        PlantRepo::find_by_id(pool, plant_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Plant",
                id: plant_id,
            })?;
        Ok(TimelineEventRepo::list_by_plant(pool, plant_id).await?)
    }

    /// Derived growth-phase intervals for a plant, oldest-first.
    ///
    /// Recomputed on every call: the open-ended last interval is closed
    /// by `as_of`, which moves with the calendar.
    pub async fn growth_timeline(
        pool: &PgPool,
        plant_id: DbId,
        as_of: NaiveDate,
    ) -> ServiceResult<Vec<PhaseInterval<TimelineEvent>>> {
        let events = TimelineEventRepo::list_phase_events(pool, plant_id).await?;
        Ok(growth::compute_growth_timeline(
            events,
            |event| event.event_date,
            as_of,
        ))
    }
}

/// Parse a `YYYY-MM-DD` date string from the web layer.
fn parse_event_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!("Invalid event date '{raw}', expected YYYY-MM-DD"))
    })
}

/// Store a batch of uploads under the event category.
///
/// Returns the stored references (in submission order) and one warning
/// per rejected file. A non-rejection failure deletes whatever the batch
/// already wrote and propagates.
async fn store_batch(
    store: &AssetStore,
    uploads: &[PhotoUpload],
) -> ServiceResult<(Vec<String>, Vec<String>)> {
    let mut file_refs = Vec::new();
    let mut warnings = Vec::new();

    for upload in uploads {
        match store
            .store(&upload.filename, &upload.bytes, PhotoCategory::Event)
            .await
        {
            Ok(reference) => file_refs.push(reference),
            Err(err) if err.is_rejection() => warnings.push(err.to_string()),
            Err(err) => {
                for reference in &file_refs {
                    store.delete(reference).await;
                }
                return Err(err.into());
            }
        }
    }

    Ok((file_refs, warnings))
}
