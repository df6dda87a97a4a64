//! Legacy photo-path normalizer.
//!
//! One idempotent sweep over locations, plants, and timeline events that
//! rewrites every historical photo-reference encoding into the canonical
//! one:
//!
//! - bare filenames and relative paths are relocated into the canonical
//!   per-category subdirectory and the reference rewritten
//! - comma-joined lists on events become ordered `event_photos` rows
//! - location binary blobs are written out as real files
//!
//! Rows already in canonical form are untouched, which is what makes a
//! second run a no-op. A reference whose source file cannot be found is
//! left unchanged and reported; the sweep never invents a reference to a
//! file that does not exist. Failures are per-row: one broken entity
//! does not roll back or stop the rest.

use std::path::PathBuf;

use serde::Serialize;
use sqlx::PgPool;

use plantarium_core::category::PhotoCategory;
use plantarium_core::photo_ref::{self, PhotoRef};
use plantarium_core::types::DbId;
use plantarium_db::repositories::{LocationRepo, PlantRepo, TimelineEventRepo};
use plantarium_store::AssetStore;

use crate::error::ServiceResult;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Entity table a report entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Location,
    Plant,
    TimelineEvent,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Plant => "plant",
            Self::TimelineEvent => "timeline_event",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the sweep did to one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationOutcome {
    /// Reference(s) rewritten to canonical form (files moved as needed).
    Migrated { references: Vec<String> },
    /// Already canonical; nothing to do.
    AlreadyCanonical,
    /// No file found at any legacy-convention location; row unchanged.
    SourceMissing,
    /// The migration attempt failed; row unchanged, sweep continued.
    Failed { reason: String },
}

/// One report line per entity the sweep looked at.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationEntry {
    pub entity: EntityKind,
    pub id: DbId,
    pub outcome: MigrationOutcome,
}

/// Result of a full sweep.
#[derive(Debug, Default, Serialize)]
pub struct MigrationReport {
    pub entries: Vec<MigrationEntry>,
}

impl MigrationReport {
    fn push(&mut self, entity: EntityKind, id: DbId, outcome: MigrationOutcome) {
        log_entry(entity, id, &outcome);
        self.entries.push(MigrationEntry {
            entity,
            id,
            outcome,
        });
    }

    pub fn migrated(&self) -> usize {
        self.count(|o| matches!(o, MigrationOutcome::Migrated { .. }))
    }

    pub fn already_canonical(&self) -> usize {
        self.count(|o| matches!(o, MigrationOutcome::AlreadyCanonical))
    }

    pub fn source_missing(&self) -> usize {
        self.count(|o| matches!(o, MigrationOutcome::SourceMissing))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, MigrationOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&MigrationOutcome) -> bool) -> usize {
        self.entries
            .iter()
            .filter(|entry| predicate(&entry.outcome))
            .count()
    }
}

/// Where a singleton reference's file ended up, before the row rewrite.
enum Relocation {
    AlreadyCanonical,
    SourceMissing,
    Moved(String),
    Failed(String),
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// The sweep itself: an asset store to move files into, and the legacy
/// directories to search for source files.
pub struct PathNormalizer {
    store: AssetStore,
    legacy_roots: Vec<PathBuf>,
}

impl PathNormalizer {
    pub fn new(store: AssetStore, legacy_roots: Vec<PathBuf>) -> Self {
        Self {
            store,
            legacy_roots,
        }
    }

    /// Run the full sweep. Errors reaching the caller are limited to the
    /// listing queries; everything per-row is captured in the report.
    pub async fn run(&self, pool: &PgPool) -> ServiceResult<MigrationReport> {
        let mut report = MigrationReport::default();

        // Locations: string references, then leftover binary blobs.
        for row in LocationRepo::legacy_photo_rows(pool).await? {
            let outcome = match self
                .relocate_singleton(&row.photo_ref, PhotoCategory::Location)
                .await
            {
                Relocation::AlreadyCanonical => MigrationOutcome::AlreadyCanonical,
                Relocation::SourceMissing => MigrationOutcome::SourceMissing,
                Relocation::Failed(reason) => MigrationOutcome::Failed { reason },
                Relocation::Moved(reference) => {
                    persist_singleton(
                        LocationRepo::set_photo_ref(pool, row.id, Some(&reference)).await,
                        reference,
                    )
                }
            };
            report.push(EntityKind::Location, row.id, outcome);
        }

        for row in LocationRepo::legacy_blob_rows(pool).await? {
            let outcome = match self
                .store
                .store_blob(&row.photo_data, PhotoCategory::Location)
                .await
            {
                Ok(reference) => persist_singleton(
                    LocationRepo::replace_blob_with_ref(pool, row.id, &reference).await,
                    reference,
                ),
                Err(err) => MigrationOutcome::Failed {
                    reason: err.to_string(),
                },
            };
            report.push(EntityKind::Location, row.id, outcome);
        }

        // Plants: string references only.
        for row in PlantRepo::legacy_photo_rows(pool).await? {
            let outcome = match self
                .relocate_singleton(&row.photo_ref, PhotoCategory::Plant)
                .await
            {
                Relocation::AlreadyCanonical => MigrationOutcome::AlreadyCanonical,
                Relocation::SourceMissing => MigrationOutcome::SourceMissing,
                Relocation::Failed(reason) => MigrationOutcome::Failed { reason },
                Relocation::Moved(reference) => persist_singleton(
                    PlantRepo::set_photo_ref(pool, row.id, Some(&reference)).await,
                    reference,
                ),
            };
            report.push(EntityKind::Plant, row.id, outcome);
        }

        // Events: single references and comma-joined lists both end up as
        // ordered attachment rows.
        for row in TimelineEventRepo::legacy_photo_rows(pool).await? {
            let outcome = self.migrate_event(pool, row.id, &row.photo_ref).await;
            report.push(EntityKind::TimelineEvent, row.id, outcome);
        }

        tracing::info!(
            migrated = report.migrated(),
            already_canonical = report.already_canonical(),
            source_missing = report.source_missing(),
            failed = report.failed(),
            "Photo path normalization finished"
        );
        Ok(report)
    }

    /// Relocate a location/plant singleton reference's file, without
    /// touching the row.
    async fn relocate_singleton(&self, raw: &str, category: PhotoCategory) -> Relocation {
        match photo_ref::classify(raw) {
            PhotoRef::Canonical(_) => Relocation::AlreadyCanonical,
            PhotoRef::PathList(_) => {
                Relocation::Failed("comma-joined list on a singleton photo reference".to_string())
            }
            PhotoRef::BareFilename(_) | PhotoRef::RelativePath(_) => {
                let Some(source) = self.find_source(raw) else {
                    return Relocation::SourceMissing;
                };
                match self.store.adopt(&source, category).await {
                    Ok(reference) => Relocation::Moved(reference),
                    Err(err) => Relocation::Failed(err.to_string()),
                }
            }
        }
    }

    /// Events are special twice over: their canonical storage is the
    /// `event_photos` table rather than the reference column, and the
    /// legacy column may hold a comma-joined list.
    async fn migrate_event(&self, pool: &PgPool, event_id: DbId, raw: &str) -> MigrationOutcome {
        let parts = match photo_ref::classify(raw) {
            PhotoRef::PathList(parts) => parts,
            PhotoRef::Canonical(single) => vec![single],
            PhotoRef::BareFilename(single) | PhotoRef::RelativePath(single) => vec![single],
        };

        // Resolve every element before moving anything: a list with one
        // missing source is left whole rather than migrated piecemeal.
        let mut sources = Vec::with_capacity(parts.len());
        for part in &parts {
            if photo_ref::is_canonical(part) {
                sources.push(None);
            } else {
                match self.find_source(part) {
                    Some(path) => sources.push(Some(path)),
                    None => return MigrationOutcome::SourceMissing,
                }
            }
        }

        let mut references = Vec::with_capacity(parts.len());
        for (part, source) in parts.iter().zip(sources) {
            match source {
                None => references.push(part.clone()),
                Some(path) => match self.store.adopt(&path, PhotoCategory::Event).await {
                    Ok(reference) => references.push(reference),
                    Err(err) => {
                        return MigrationOutcome::Failed {
                            reason: err.to_string(),
                        }
                    }
                },
            }
        }

        match TimelineEventRepo::replace_legacy_with_attachments(pool, event_id, &references).await
        {
            Ok(()) => MigrationOutcome::Migrated { references },
            Err(err) => MigrationOutcome::Failed {
                reason: err.to_string(),
            },
        }
    }

    /// Try each legacy root with the stored path (leading slash
    /// stripped), then with just the file name. First existing file wins.
    fn find_source(&self, raw: &str) -> Option<PathBuf> {
        let relative = raw.trim_start_matches('/');
        let name = photo_ref::file_name(raw);

        for root in &self.legacy_roots {
            for candidate in [root.join(relative), root.join(name)] {
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

/// Fold a row-rewrite result into the outcome for an already-moved file.
fn persist_singleton(
    result: Result<bool, sqlx::Error>,
    reference: String,
) -> MigrationOutcome {
    match result {
        Ok(_) => MigrationOutcome::Migrated {
            references: vec![reference],
        },
        Err(err) => MigrationOutcome::Failed {
            reason: err.to_string(),
        },
    }
}

fn log_entry(entity: EntityKind, id: DbId, outcome: &MigrationOutcome) {
    match outcome {
        MigrationOutcome::Migrated { references } => {
            tracing::info!(%entity, id, ?references, "Migrated photo reference");
        }
        MigrationOutcome::AlreadyCanonical => {
            tracing::debug!(%entity, id, "Photo reference already canonical");
        }
        MigrationOutcome::SourceMissing => {
            tracing::warn!(%entity, id, "Legacy photo file missing, row left unmigrated");
        }
        MigrationOutcome::Failed { reason } => {
            tracing::warn!(%entity, id, reason = %reason, "Photo migration failed for this row");
        }
    }
}
