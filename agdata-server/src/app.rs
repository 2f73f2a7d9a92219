use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::{SchemaManager, Settings, Storage};
use crate::handles::*;
use crate::repositories::{
    EventRepository, MeasurementRepository, SensorRepository, SensorTypeRepository,
    VenueRepository,
};
use crate::services::{MeasurementService, SensorTypeRegistry};

/// Opens the database, puts every built-in sensor type in place and builds
/// the router.
pub async fn create_app(settings: &Arc<Settings>) -> anyhow::Result<Router> {
    let storage = Arc::new(Storage::new(settings.database.clone(), SchemaManager::default()).await?);

    let sensor_type_repository = Arc::new(SensorTypeRepository::new(storage.clone()));
    let registry = Arc::new(SensorTypeRegistry::new(sensor_type_repository));
    registry.create_or_reset_all_built_in_sensor_types().await?;

    Ok(create_router(storage, registry))
}

pub fn create_router(storage: Arc<Storage>, registry: Arc<SensorTypeRegistry>) -> Router {
    let venue_repository = Arc::new(VenueRepository::new(storage.clone()));
    let event_repository = Arc::new(EventRepository::new(storage.clone()));
    let sensor_repository = Arc::new(SensorRepository::new(storage.clone()));
    let sensor_type_repository = Arc::new(SensorTypeRepository::new(storage.clone()));
    let measurement_repository = Arc::new(MeasurementRepository::new(storage.clone()));

    let measurement_service = Arc::new(MeasurementService::new(
        event_repository.clone(),
        sensor_repository.clone(),
        sensor_type_repository.clone(),
        measurement_repository,
    ));

    Router::new()
        .merge(sensor_type_router(SensorTypeState {
            registry,
            sensor_type_repository: sensor_type_repository.clone(),
        }))
        .merge(catalog_router(CatalogState {
            venue_repository,
            event_repository,
            sensor_repository,
            sensor_type_repository,
        }))
        .merge(measurement_router(MeasurementState {
            measurement_service,
        }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
