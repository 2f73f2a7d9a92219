use std::sync::Arc;

use agdata_api::models::{MeasurementResponse, SensorPayload};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::errors::MeasurementError;
use crate::models::{Event, Measurement, Sensor, SensorType};
use crate::repositories::{
    EventRepository, MeasurementRepository, SensorRepository, SensorTypeRepository,
};

/// A single reading tied to the event, sensor and time it was taken at.
///
/// Built once per measurement and never mutated. The sensor type and its
/// formula are looked up on every access rather than captured at construction.
#[derive(Debug, Clone)]
pub struct MeasurementExchange {
    event: Event,
    timestamp: OffsetDateTime,
    sensor: Sensor,
    reading: Map<String, Value>,
}

impl MeasurementExchange {
    pub fn new(
        event: Event,
        timestamp: OffsetDateTime,
        sensor: Sensor,
        reading: Value,
    ) -> Result<Self, MeasurementError> {
        let Value::Object(reading) = reading else {
            return Err(MeasurementError::InvalidReading);
        };

        Ok(Self {
            event,
            timestamp,
            sensor,
            reading,
        })
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    pub fn sensor(&self) -> &Sensor {
        &self.sensor
    }

    pub fn reading(&self) -> &Map<String, Value> {
        &self.reading
    }

    pub async fn sensor_type(
        &self,
        repository: &SensorTypeRepository,
    ) -> Result<SensorType, MeasurementError> {
        repository
            .find_by_id(self.sensor.type_id)
            .await?
            .ok_or(MeasurementError::SensorTypeNotFound(self.sensor.type_id))
    }

    pub async fn processing_formula(
        &self,
        repository: &SensorTypeRepository,
    ) -> Result<String, MeasurementError> {
        Ok(self.sensor_type(repository).await?.processing_formula)
    }
}

pub struct MeasurementService {
    event_repository: Arc<EventRepository>,
    sensor_repository: Arc<SensorRepository>,
    sensor_type_repository: Arc<SensorTypeRepository>,
    measurement_repository: Arc<MeasurementRepository>,
}

impl MeasurementService {
    pub fn new(
        event_repository: Arc<EventRepository>,
        sensor_repository: Arc<SensorRepository>,
        sensor_type_repository: Arc<SensorTypeRepository>,
        measurement_repository: Arc<MeasurementRepository>,
    ) -> Self {
        Self {
            event_repository,
            sensor_repository,
            sensor_type_repository,
            measurement_repository,
        }
    }

    /// Resolves the payload's sensor and event into an exchange. Without an
    /// explicit event the latest one is used.
    pub async fn exchange(
        &self,
        payload: SensorPayload,
    ) -> Result<MeasurementExchange, MeasurementError> {
        let sensor = self
            .sensor_repository
            .find_by_id(payload.sensor_id)
            .await?
            .ok_or(MeasurementError::SensorNotFound(payload.sensor_id))?;

        let event = match payload.event_id {
            Some(event_id) => self
                .event_repository
                .find_by_id(event_id)
                .await?
                .ok_or(MeasurementError::EventNotFound(event_id))?,
            None => self
                .event_repository
                .find_latest()
                .await?
                .ok_or(MeasurementError::NoEvent)?,
        };

        MeasurementExchange::new(event, payload.date, sensor, payload.values)
    }

    pub async fn record(
        &self,
        payload: SensorPayload,
    ) -> Result<MeasurementResponse, MeasurementError> {
        let exchange = self.exchange(payload).await?;
        let processing_formula = exchange
            .processing_formula(&self.sensor_type_repository)
            .await?;

        let mut measurement = Measurement {
            id: 0,
            event_id: exchange.event().id,
            sensor_id: exchange.sensor().id,
            timestamp: exchange.timestamp(),
            value: Value::Object(exchange.reading().clone()),
        };

        let mut tx = self.measurement_repository.get_pool().begin().await?;
        measurement.id = self
            .measurement_repository
            .create(&measurement, &mut tx)
            .await?;
        tx.commit().await?;

        tracing::debug!(
            "stored measurement {} from sensor {} for event {}",
            measurement.id,
            measurement.sensor_id,
            measurement.event_id
        );

        Ok(MeasurementResponse {
            id: measurement.id,
            event_id: measurement.event_id,
            sensor_id: measurement.sensor_id,
            timestamp: measurement.timestamp,
            value: measurement.value,
            processing_formula,
        })
    }
}
