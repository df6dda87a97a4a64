//! `normalize_photos` -- one-shot legacy photo-path normalization.
//!
//! Scans all locations, plants, and timeline events and rewrites any
//! photo reference still stored in a historical encoding into the
//! canonical `<category-subdir>/<filename>` form, relocating files as
//! needed. Safe to re-run: already-canonical rows are untouched.
//!
//! # Environment variables
//!
//! | Variable            | Required | Default       | Description                          |
//! |---------------------|----------|---------------|--------------------------------------|
//! | `DATABASE_URL`      | yes      | --            | PostgreSQL connection URL            |
//! | `ASSET_ROOT`        | no       | `data/photos` | Root of the photo asset store        |
//! | `LEGACY_PHOTO_DIRS` | no       | `data/photo`  | Comma-separated legacy photo folders |

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plantarium_service::config::AppConfig;
use plantarium_service::normalizer::{MigrationOutcome, PathNormalizer};
use plantarium_store::AssetStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plantarium_service=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        asset_root = %config.asset_root.display(),
        legacy_dirs = config.legacy_photo_dirs.len(),
        "Starting photo path normalization"
    );

    let pool = plantarium_db::create_pool(&config.database_url).await?;
    plantarium_db::health_check(&pool).await?;
    plantarium_db::run_migrations(&pool).await?;

    let store = AssetStore::new(config.asset_root);
    let normalizer = PathNormalizer::new(store, config.legacy_photo_dirs);
    let report = normalizer.run(&pool).await?;

    for entry in &report.entries {
        match &entry.outcome {
            MigrationOutcome::SourceMissing => {
                println!("{} {}: source file missing, left unmigrated", entry.entity, entry.id);
            }
            MigrationOutcome::Failed { reason } => {
                println!("{} {}: failed ({reason})", entry.entity, entry.id);
            }
            _ => {}
        }
    }
    println!(
        "normalized {} row(s), {} already canonical, {} missing source, {} failed",
        report.migrated(),
        report.already_canonical(),
        report.source_missing(),
        report.failed(),
    );

    Ok(())
}
