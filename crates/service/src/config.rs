use std::path::PathBuf;

/// Configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection URL (required).
    pub database_url: String,
    /// Root directory of the photo asset store (default: `data/photos`).
    pub asset_root: PathBuf,
    /// Directories searched for legacy photo files during normalization,
    /// parsed from comma-separated `LEGACY_PHOTO_DIRS`
    /// (default: `data/photo`).
    pub legacy_photo_dirs: Vec<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default      |
    /// |---------------------|--------------|
    /// | `DATABASE_URL`      | -- (required)|
    /// | `ASSET_ROOT`        | `data/photos`|
    /// | `LEGACY_PHOTO_DIRS` | `data/photo` |
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let asset_root = std::env::var("ASSET_ROOT")
            .unwrap_or_else(|_| "data/photos".into())
            .into();

        let legacy_photo_dirs: Vec<PathBuf> = std::env::var("LEGACY_PHOTO_DIRS")
            .unwrap_or_else(|_| "data/photo".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();

        Self {
            database_url,
            asset_root,
            legacy_photo_dirs,
        }
    }
}
