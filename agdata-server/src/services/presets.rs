//! Built-in sensor types.
//!
//! Every preset owns a fixed, even id. Odd ids are left to custom types, see
//! [`next_sensor_type_id`](super::next_sensor_type_id).

use serde_json::{Value, json};

use crate::models::SensorType;

#[derive(Debug, Clone, PartialEq)]
pub struct SensorTypePreset {
    pub id: i32,
    pub name: String,
    pub processing_formula: String,
    pub format: Value,
}

impl SensorTypePreset {
    pub fn new(id: i32, name: &str, processing_formula: &str, format: Value) -> Self {
        Self {
            id,
            name: name.to_string(),
            processing_formula: processing_formula.to_string(),
            format,
        }
    }

    pub fn to_sensor_type(&self) -> SensorType {
        SensorType {
            id: self.id,
            name: self.name.clone(),
            processing_formula: self.processing_formula.clone(),
            format: self.format.clone(),
        }
    }
}

fn scalar(key: &str, unit: &str) -> Value {
    json!({ key: { "unit": unit, "format": "float" } })
}

fn vector(keys: [&str; 3], unit: &str) -> Value {
    let mut format = serde_json::Map::new();
    for key in keys {
        format.insert(key.to_string(), json!({ "unit": unit, "format": "float" }));
    }
    Value::Object(format)
}

pub fn built_in_sensor_types() -> Vec<SensorTypePreset> {
    vec![
        SensorTypePreset::new(2, "Temperature", "x", scalar("temperature", "celsius")),
        SensorTypePreset::new(4, "Pressure", "x", scalar("pressure", "millibars")),
        SensorTypePreset::new(6, "Humidity", "x", scalar("humidity", "percent")),
        SensorTypePreset::new(8, "Acceleration", "x", vector(["x", "y", "z"], "g")),
        SensorTypePreset::new(10, "Orientation", "x", vector(["roll", "pitch", "yaw"], "degrees")),
        SensorTypePreset::new(
            12,
            "Geolocation",
            "x",
            json!({
                "latitude": { "unit": "degrees", "format": "float" },
                "longitude": { "unit": "degrees", "format": "float" },
                "altitude": { "unit": "meters", "format": "float" },
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_built_in_ids_are_even_and_unique() {
        let presets = built_in_sensor_types();
        let ids: HashSet<i32> = presets.iter().map(|p| p.id).collect();

        assert_eq!(ids.len(), presets.len());
        assert!(presets.iter().all(|p| p.id > 0 && p.id % 2 == 0));
    }

    #[test]
    fn test_formats_are_objects() {
        for preset in built_in_sensor_types() {
            assert!(preset.format.is_object(), "{} has no object format", preset.name);
        }
    }
}
