use std::sync::Arc;

use agdata_api::models::{CreateEventRequest, CreateSensorRequest, CreateVenueRequest};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::errors::{ApiError, CatalogError};
use crate::models::{Event, Sensor, Venue};
use crate::repositories::{EventRepository, SensorRepository, SensorTypeRepository, VenueRepository};

#[derive(Clone)]
pub struct CatalogState {
    pub venue_repository: Arc<VenueRepository>,
    pub event_repository: Arc<EventRepository>,
    pub sensor_repository: Arc<SensorRepository>,
    pub sensor_type_repository: Arc<SensorTypeRepository>,
}

pub fn catalog_router(state: CatalogState) -> Router {
    Router::new()
        .route("/api/venues", get(get_venues).post(create_venue))
        .route("/api/events", get(get_events).post(create_event))
        .route("/api/sensors", get(get_sensors).post(create_sensor))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/venues",
    tag = "catalog",
    responses(
        (status = 200, description = "All venues", body = Vec<Venue>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_venues(State(state): State<CatalogState>) -> Result<Json<Vec<Venue>>, ApiError> {
    Ok(Json(state.venue_repository.find_all().await?))
}

#[utoipa::path(
    post,
    path = "/api/venues",
    tag = "catalog",
    request_body = CreateVenueRequest,
    responses(
        (status = 201, description = "Venue created", body = Venue),
        (status = 400, description = "Invalid request parameters"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_venue(
    State(state): State<CatalogState>,
    Json(body): Json<CreateVenueRequest>,
) -> Result<(StatusCode, Json<Venue>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(CatalogError::InvalidRequest.into());
    }

    let mut venue = Venue {
        id: 0,
        name: body.name,
        description: body.description,
        latitude: body.latitude,
        longitude: body.longitude,
    };

    let mut tx = state.venue_repository.get_pool().begin().await?;
    venue.id = state.venue_repository.create(&venue, &mut tx).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(venue)))
}

#[utoipa::path(
    get,
    path = "/api/events",
    tag = "catalog",
    responses(
        (status = 200, description = "All events ordered by date", body = Vec<Event>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_events(State(state): State<CatalogState>) -> Result<Json<Vec<Event>>, ApiError> {
    Ok(Json(state.event_repository.find_all().await?))
}

#[utoipa::path(
    post,
    path = "/api/events",
    tag = "catalog",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid request parameters"),
        (status = 404, description = "Venue not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_event(
    State(state): State<CatalogState>,
    Json(body): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(CatalogError::InvalidRequest.into());
    }

    state
        .venue_repository
        .find_by_id(body.venue_id)
        .await?
        .ok_or(CatalogError::VenueNotFound)?;

    let mut event = Event {
        id: 0,
        venue_id: body.venue_id,
        name: body.name,
        date: body.date,
        description: body.description,
    };

    let mut tx = state.event_repository.get_pool().begin().await?;
    event.id = state.event_repository.create(&event, &mut tx).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(event)))
}

#[utoipa::path(
    get,
    path = "/api/sensors",
    tag = "catalog",
    responses(
        (status = 200, description = "All sensors", body = Vec<Sensor>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_sensors(State(state): State<CatalogState>) -> Result<Json<Vec<Sensor>>, ApiError> {
    Ok(Json(state.sensor_repository.find_all().await?))
}

#[utoipa::path(
    post,
    path = "/api/sensors",
    tag = "catalog",
    request_body = CreateSensorRequest,
    responses(
        (status = 201, description = "Sensor created", body = Sensor),
        (status = 400, description = "Invalid request parameters"),
        (status = 404, description = "Sensor type not found"),
        (status = 409, description = "Sensor name already taken"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_sensor(
    State(state): State<CatalogState>,
    Json(body): Json<CreateSensorRequest>,
) -> Result<(StatusCode, Json<Sensor>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(CatalogError::InvalidRequest.into());
    }

    state
        .sensor_type_repository
        .find_by_id(body.type_id)
        .await?
        .ok_or(CatalogError::SensorTypeNotFound)?;

    if state.sensor_repository.find_by_name(&body.name).await?.is_some() {
        return Err(CatalogError::SensorNameExists.into());
    }

    let mut sensor = Sensor {
        id: 0,
        name: body.name,
        type_id: body.type_id,
    };

    let mut tx = state.sensor_repository.get_pool().begin().await?;
    sensor.id = state.sensor_repository.create(&sensor, &mut tx).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(sensor)))
}
