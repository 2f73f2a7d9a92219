use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Id;

/// Reading emitted by a hardware node and accepted by the ingest endpoint.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorPayload {
    /// Sensor that produced the reading
    pub sensor_id: Id,
    /// Key-value reading, e.g. `{"temperature": 21.4}`
    pub values: serde_json::Value,
    /// Time the reading was taken
    #[serde(with = "time::serde::rfc3339")]
    #[cfg_attr(feature = "docs", schema(value_type = String))]
    pub date: OffsetDateTime,
    /// Event the reading belongs to, the latest event when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<Id>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResponse {
    /// Measurement identifier
    pub id: Id,
    /// Owning event
    pub event_id: Id,
    /// Originating sensor
    pub sensor_id: Id,
    /// Time of the reading
    #[serde(with = "time::serde::rfc3339")]
    #[cfg_attr(feature = "docs", schema(value_type = String))]
    pub timestamp: OffsetDateTime,
    /// Stored reading document
    pub value: serde_json::Value,
    /// Formula of the sensor's type at ingest time
    pub processing_formula: String,
}
