use super::{CatalogError, MeasurementError, RegistryError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Catalog error: {0}")]
    CatalogError(#[from] CatalogError),

    #[error("Registry error: {0}")]
    RegistryError(#[from] RegistryError),

    #[error("Measurement error: {0}")]
    MeasurementError(#[from] MeasurementError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}
