mod measurement_service;
pub mod presets;
mod registry_service;

pub use measurement_service::{MeasurementExchange, MeasurementService};
pub use presets::{SensorTypePreset, built_in_sensor_types};
pub use registry_service::{
    SensorTypeRegistry, assert_event, assert_sensor, assert_sensor_type, assert_venue,
    next_sensor_type_id,
};
