use serde::{Deserialize, Serialize};

use super::Id;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSensorTypeRequest {
    /// Display name of the sensor type
    pub name: String,
    /// Expression applied to raw readings
    pub processing_formula: String,
    /// Shape of the reading document, an empty object when omitted
    #[serde(default = "empty_format")]
    pub format: serde_json::Value,
}

fn empty_format() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorTypeResponse {
    /// Sensor type identifier, even for built-ins and odd for custom types
    pub id: Id,
    /// Display name of the sensor type
    pub name: String,
    /// Expression applied to raw readings
    pub processing_formula: String,
    /// Shape of the reading document
    pub format: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_missing_format_is_empty_object() {
        let request: CreateSensorTypeRequest =
            serde_json::from_str(r#"{"name": "Soil Moisture", "processing_formula": "x"}"#).unwrap();

        assert_eq!(request.format, json!({}));
    }

    #[test]
    fn test_explicit_format_is_kept() {
        let request: CreateSensorTypeRequest = serde_json::from_str(
            r#"{"name": "Soil Moisture", "processing_formula": "x", "format": {"moisture": "%"}}"#,
        )
        .unwrap();

        assert_eq!(request.format, json!({"moisture": "%"}));
    }
}
