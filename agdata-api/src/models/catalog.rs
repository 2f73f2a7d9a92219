use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Id;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateVenueRequest {
    /// Venue name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Latitude in decimal degrees
    #[serde(default)]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[serde(default)]
    pub longitude: f64,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    /// Hosting venue
    pub venue_id: Id,
    /// Event name
    pub name: String,
    /// Event date
    #[serde(with = "time::serde::rfc3339")]
    #[cfg_attr(feature = "docs", schema(value_type = String))]
    pub date: OffsetDateTime,
    /// Free-form description
    #[serde(default)]
    pub description: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSensorRequest {
    /// Unique sensor name
    pub name: String,
    /// Sensor type of the new sensor
    pub type_id: Id,
}
