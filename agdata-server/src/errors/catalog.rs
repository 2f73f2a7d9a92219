use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Venue not found")]
    VenueNotFound,

    #[error("Sensor type not found")]
    SensorTypeNotFound,

    #[error("Sensor name already exists")]
    SensorNameExists,

    #[error("Invalid request parameters")]
    InvalidRequest,
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::VenueNotFound => StatusCode::NOT_FOUND,
            CatalogError::SensorTypeNotFound => StatusCode::NOT_FOUND,
            CatalogError::SensorNameExists => StatusCode::CONFLICT,
            CatalogError::InvalidRequest => StatusCode::BAD_REQUEST,
        }
    }
}
