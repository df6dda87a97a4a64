//! Normalizer integration tests: one per legacy encoding, plus the
//! idempotence and missing-source contracts.

mod common;

use sqlx::PgPool;

use common::{file_count, fixture};
use plantarium_db::models::location::CreateLocation;
use plantarium_db::repositories::{EventPhotoRepo, LocationRepo, PlantRepo, TimelineEventRepo};
use plantarium_service::normalizer::{MigrationOutcome, PathNormalizer};
use plantarium_store::AssetStore;

const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0];

/// Asset root, legacy directory, and a normalizer wired to both.
struct Rig {
    _assets: tempfile::TempDir,
    legacy: tempfile::TempDir,
    store: AssetStore,
    normalizer: PathNormalizer,
}

fn rig() -> Rig {
    let assets = tempfile::tempdir().unwrap();
    let legacy = tempfile::tempdir().unwrap();
    let store = AssetStore::new(assets.path());
    let normalizer = PathNormalizer::new(store.clone(), vec![legacy.path().to_path_buf()]);
    Rig {
        _assets: assets,
        legacy,
        store,
        normalizer,
    }
}

impl Rig {
    /// Drop a legacy file at `relative` under the legacy root.
    fn seed_file(&self, relative: &str) {
        let path = self.legacy.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"legacy photo").unwrap();
    }
}

async fn legacy_location(pool: &PgPool, user_id: i64, photo_ref: &str) -> i64 {
    LocationRepo::create(
        pool,
        &CreateLocation {
            user_id,
            name: "Old shelf".to_string(),
            description: None,
            lighting: None,
            substrate: None,
            photo_ref: Some(photo_ref.to_string()),
        },
    )
    .await
    .unwrap()
    .id
}

/// Give the fixture plant's event a raw legacy photo reference.
async fn legacy_event(pool: &PgPool, plant_id: i64, photo_ref: &str) -> i64 {
    let (event, _) = TimelineEventRepo::create_with_photos(
        pool,
        &plantarium_db::models::timeline_event::CreateTimelineEvent {
            plant_id,
            kind: "note".to_string(),
            event_date: chrono::NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(),
            title: "old note".to_string(),
            description: None,
            phase_id: None,
            fertilization_type: None,
            fertilization_amount: None,
        },
        &[],
    )
    .await
    .unwrap();

    sqlx::query("UPDATE timeline_events SET photo_ref = $2 WHERE id = $1")
        .bind(event.id)
        .bind(photo_ref)
        .execute(pool)
        .await
        .unwrap();
    event.id
}

// ---------------------------------------------------------------------------
// Bare filename
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bare_filename_location_migrates(pool: PgPool) {
    let fx = fixture(&pool).await;
    let rig = rig();
    rig.seed_file("shelf.jpg");
    let location_id = legacy_location(&pool, fx.user_id, "shelf.jpg").await;

    let report = rig.normalizer.run(&pool).await.unwrap();
    assert_eq!(report.migrated(), 1);

    let location = LocationRepo::find_by_id(&pool, location_id).await.unwrap().unwrap();
    assert_eq!(location.photo_ref.as_deref(), Some("locations/shelf.jpg"));
    assert!(rig.store.exists("locations/shelf.jpg"));
    assert!(!rig.legacy.path().join("shelf.jpg").exists());
}

// ---------------------------------------------------------------------------
// Relative path
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_relative_path_plant_migrates(pool: PgPool) {
    let fx = fixture(&pool).await;
    let rig = rig();
    rig.seed_file("static/uploads/rose_20240101.png");
    PlantRepo::set_photo_ref(&pool, fx.plant_id, Some("/static/uploads/rose_20240101.png"))
        .await
        .unwrap();

    let report = rig.normalizer.run(&pool).await.unwrap();
    assert_eq!(report.migrated(), 1);

    let plant = PlantRepo::find_by_id(&pool, fx.plant_id).await.unwrap().unwrap();
    assert_eq!(plant.photo_ref.as_deref(), Some("plants/rose_20240101.png"));
    assert!(rig.store.exists("plants/rose_20240101.png"));
}

// ---------------------------------------------------------------------------
// Comma-joined list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comma_list_becomes_ordered_attachments(pool: PgPool) {
    let fx = fixture(&pool).await;
    let rig = rig();
    rig.seed_file("first.jpg");
    rig.seed_file("second.jpg");
    let event_id = legacy_event(&pool, fx.plant_id, "first.jpg, second.jpg").await;

    let report = rig.normalizer.run(&pool).await.unwrap();
    assert_eq!(report.migrated(), 1);

    let photos = EventPhotoRepo::list_by_event(&pool, event_id).await.unwrap();
    assert_eq!(photos.len(), 2);
    assert_eq!(photos[0].file_ref, "events/first.jpg");
    assert_eq!(photos[0].sort_order, 0);
    assert_eq!(photos[1].file_ref, "events/second.jpg");
    assert_eq!(photos[1].sort_order, 1);

    let event = TimelineEventRepo::find_by_id(&pool, event_id).await.unwrap().unwrap();
    assert_eq!(event.photo_ref, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_with_missing_element_left_whole(pool: PgPool) {
    let fx = fixture(&pool).await;
    let rig = rig();
    rig.seed_file("present.jpg");
    let event_id = legacy_event(&pool, fx.plant_id, "present.jpg,gone.jpg").await;

    let report = rig.normalizer.run(&pool).await.unwrap();
    assert_eq!(report.migrated(), 0);
    assert_eq!(report.source_missing(), 1);

    // Row unchanged, no attachment rows, and the resolvable file was not
    // moved either.
    let event = TimelineEventRepo::find_by_id(&pool, event_id).await.unwrap().unwrap();
    assert_eq!(event.photo_ref.as_deref(), Some("present.jpg,gone.jpg"));
    assert!(EventPhotoRepo::list_by_event(&pool, event_id).await.unwrap().is_empty());
    assert!(rig.legacy.path().join("present.jpg").exists());
}

// ---------------------------------------------------------------------------
// Binary blob
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_location_blob_written_out(pool: PgPool) {
    let fx = fixture(&pool).await;
    let rig = rig();
    let location_id = LocationRepo::create(
        &pool,
        &CreateLocation {
            user_id: fx.user_id,
            name: "Blob shelf".to_string(),
            description: None,
            lighting: None,
            substrate: None,
            photo_ref: None,
        },
    )
    .await
    .unwrap()
    .id;
    sqlx::query("UPDATE locations SET photo_data = $2 WHERE id = $1")
        .bind(location_id)
        .bind(PNG_HEADER)
        .execute(&pool)
        .await
        .unwrap();

    let report = rig.normalizer.run(&pool).await.unwrap();
    assert_eq!(report.migrated(), 1);

    let location = LocationRepo::find_by_id(&pool, location_id).await.unwrap().unwrap();
    let reference = location.photo_ref.unwrap();
    assert!(reference.starts_with("locations/"));
    assert!(reference.ends_with(".png"));
    assert!(rig.store.exists(&reference));

    let blob: Option<Vec<u8>> =
        sqlx::query_scalar("SELECT photo_data FROM locations WHERE id = $1")
            .bind(location_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(blob, None);
}

// ---------------------------------------------------------------------------
// Missing source
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_source_flagged_not_invented(pool: PgPool) {
    let fx = fixture(&pool).await;
    let rig = rig();
    let location_id = legacy_location(&pool, fx.user_id, "vanished.jpg").await;

    let report = rig.normalizer.run(&pool).await.unwrap();
    assert_eq!(report.migrated(), 0);
    assert_eq!(report.source_missing(), 1);
    assert!(report
        .entries
        .iter()
        .any(|e| e.id == location_id && e.outcome == MigrationOutcome::SourceMissing));

    // Row untouched so a future run can pick it up.
    let location = LocationRepo::find_by_id(&pool, location_id).await.unwrap().unwrap();
    assert_eq!(location.photo_ref.as_deref(), Some("vanished.jpg"));
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_run_is_noop(pool: PgPool) {
    let fx = fixture(&pool).await;
    let rig = rig();
    rig.seed_file("shelf.jpg");
    rig.seed_file("alpha.jpg");
    rig.seed_file("beta.jpg");
    let location_id = legacy_location(&pool, fx.user_id, "shelf.jpg").await;
    legacy_event(&pool, fx.plant_id, "alpha.jpg,beta.jpg").await;

    let first = rig.normalizer.run(&pool).await.unwrap();
    assert_eq!(first.migrated(), 2);

    let files_after_first = file_count(rig.store.root());
    let reference_after_first = LocationRepo::find_by_id(&pool, location_id)
        .await
        .unwrap()
        .unwrap()
        .photo_ref;

    let second = rig.normalizer.run(&pool).await.unwrap();
    assert_eq!(second.migrated(), 0, "second run must not move anything");
    assert_eq!(second.source_missing(), 0);
    assert_eq!(second.failed(), 0);
    assert_eq!(second.already_canonical(), 1); // the location row, now canonical

    assert_eq!(file_count(rig.store.root()), files_after_first);
    let reference_after_second = LocationRepo::find_by_id(&pool, location_id)
        .await
        .unwrap()
        .unwrap()
        .photo_ref;
    assert_eq!(reference_after_first, reference_after_second);
}
