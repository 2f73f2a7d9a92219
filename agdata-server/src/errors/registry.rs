use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Cannot find requested sensor type (index {index}) from presets")]
    PresetIndexOutOfRange { index: usize, len: usize },

    #[error("{0}")]
    Assertion(&'static str),

    #[error("Sensor type not found")]
    SensorTypeNotFound,

    #[error("No sensor type id left to allocate")]
    IdSpaceExhausted,

    #[error("Invalid request parameters")]
    InvalidRequest,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RegistryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistryError::PresetIndexOutOfRange { .. } => StatusCode::NOT_FOUND,
            RegistryError::Assertion(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RegistryError::SensorTypeNotFound => StatusCode::NOT_FOUND,
            RegistryError::IdSpaceExhausted => StatusCode::CONFLICT,
            RegistryError::InvalidRequest => StatusCode::BAD_REQUEST,
            RegistryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
