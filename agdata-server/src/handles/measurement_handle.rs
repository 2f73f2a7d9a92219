use std::sync::Arc;

use agdata_api::models::{MeasurementResponse, SensorPayload};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use crate::errors::ApiError;
use crate::services::MeasurementService;

#[derive(Clone)]
pub struct MeasurementState {
    pub measurement_service: Arc<MeasurementService>,
}

pub fn measurement_router(state: MeasurementState) -> Router {
    Router::new()
        .route("/api/measurements", post(create_measurement))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/measurements",
    tag = "measurement",
    request_body = SensorPayload,
    responses(
        (status = 201, description = "Reading stored", body = MeasurementResponse),
        (status = 400, description = "Reading is not a key-value object"),
        (status = 404, description = "Sensor or event not found"),
        (status = 409, description = "No event to attach the reading to"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_measurement(
    State(state): State<MeasurementState>,
    Json(body): Json<SensorPayload>,
) -> Result<(StatusCode, Json<MeasurementResponse>), ApiError> {
    let measurement = state.measurement_service.record(body).await?;

    Ok((StatusCode::CREATED, Json(measurement)))
}
