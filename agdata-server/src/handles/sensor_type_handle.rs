use std::sync::Arc;

use agdata_api::models::{CreateSensorTypeRequest, SensorTypeResponse};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::errors::{ApiError, RegistryError};
use crate::repositories::SensorTypeRepository;
use crate::services::SensorTypeRegistry;

#[derive(Clone)]
pub struct SensorTypeState {
    pub registry: Arc<SensorTypeRegistry>,
    pub sensor_type_repository: Arc<SensorTypeRepository>,
}

pub fn sensor_type_router(state: SensorTypeState) -> Router {
    Router::new()
        .route(
            "/api/sensor-types",
            get(get_sensor_types).post(create_sensor_type),
        )
        .route("/api/sensor-types/presets", post(reset_built_in_sensor_types))
        .route(
            "/api/sensor-types/presets/:index",
            put(reset_built_in_sensor_type),
        )
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/sensor-types",
    tag = "sensor_type",
    responses(
        (status = 200, description = "All sensor types ordered by id", body = Vec<SensorTypeResponse>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_sensor_types(
    State(state): State<SensorTypeState>,
) -> Result<Json<Vec<SensorTypeResponse>>, ApiError> {
    let sensor_types = state.sensor_type_repository.find_all().await?;

    Ok(Json(sensor_types.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/sensor-types",
    tag = "sensor_type",
    request_body = CreateSensorTypeRequest,
    responses(
        (status = 201, description = "Custom sensor type created with an odd id", body = SensorTypeResponse),
        (status = 400, description = "Invalid request parameters"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_sensor_type(
    State(state): State<SensorTypeState>,
    Json(body): Json<CreateSensorTypeRequest>,
) -> Result<(StatusCode, Json<SensorTypeResponse>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(RegistryError::InvalidRequest.into());
    }

    let sensor_type = state
        .registry
        .create_custom_sensor_type(&body.name, &body.processing_formula, body.format)
        .await?;

    Ok((StatusCode::CREATED, Json(sensor_type.into())))
}

#[utoipa::path(
    post,
    path = "/api/sensor-types/presets",
    tag = "sensor_type",
    responses(
        (status = 200, description = "Every built-in sensor type created or reset", body = Vec<SensorTypeResponse>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn reset_built_in_sensor_types(
    State(state): State<SensorTypeState>,
) -> Result<Json<Vec<SensorTypeResponse>>, ApiError> {
    let sensor_types = state
        .registry
        .create_or_reset_all_built_in_sensor_types()
        .await?;

    Ok(Json(sensor_types.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    put,
    path = "/api/sensor-types/presets/{index}",
    tag = "sensor_type",
    params(
        ("index" = usize, Path, description = "Preset index")
    ),
    responses(
        (status = 200, description = "Built-in sensor type created or reset", body = SensorTypeResponse),
        (status = 404, description = "No preset at this index"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn reset_built_in_sensor_type(
    State(state): State<SensorTypeState>,
    Path(index): Path<usize>,
) -> Result<Json<SensorTypeResponse>, ApiError> {
    let sensor_type = state
        .registry
        .create_or_reset_built_in_sensor_type_at_preset_index(index)
        .await?;

    Ok(Json(sensor_type.into()))
}
