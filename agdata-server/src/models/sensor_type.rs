use agdata_api::models::SensorTypeResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SensorType {
    pub id: i32,
    pub name: String,
    pub processing_formula: String,
    pub format: Value,
}

impl From<SensorType> for SensorTypeResponse {
    fn from(value: SensorType) -> Self {
        Self {
            id: value.id,
            name: value.name,
            processing_formula: value.processing_formula,
            format: value.format,
        }
    }
}

#[derive(Clone)]
pub struct SensorTypeTable;

impl Table for SensorTypeTable {
    fn name(&self) -> &'static str {
        "sensor_types"
    }

    // Ids are assigned by the registry, never by the database.
    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS sensor_types (
                id INTEGER PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                processing_formula TEXT NOT NULL,
                format JSON NOT NULL DEFAULT '{}'
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS sensor_types;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
