use plantarium_core::error::CoreError;
use plantarium_store::StoreError;

/// Error type for service operations.
///
/// Wraps [`CoreError`] for domain errors, [`StoreError`] for fatal asset
/// storage failures, and `sqlx::Error` for database errors. Upload
/// rejections never surface here: they are returned as per-file warnings
/// by the operations that accept uploads.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Convenience type alias for service return values.
pub type ServiceResult<T> = Result<T, ServiceError>;
