use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum MeasurementError {
    #[error("Reading must be a key-value object")]
    InvalidReading,

    #[error("Sensor {0} not found")]
    SensorNotFound(i32),

    #[error("Sensor type {0} not found")]
    SensorTypeNotFound(i32),

    #[error("Event {0} not found")]
    EventNotFound(i32),

    #[error("No event available for the measurement")]
    NoEvent,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl MeasurementError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MeasurementError::InvalidReading => StatusCode::BAD_REQUEST,
            MeasurementError::SensorNotFound(_) => StatusCode::NOT_FOUND,
            MeasurementError::SensorTypeNotFound(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MeasurementError::EventNotFound(_) => StatusCode::NOT_FOUND,
            MeasurementError::NoEvent => StatusCode::CONFLICT,
            MeasurementError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
