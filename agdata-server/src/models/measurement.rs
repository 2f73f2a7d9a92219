use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use super::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Measurement {
    pub id: i32,
    pub event_id: i32,
    pub sensor_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub value: Value,
}

#[derive(Clone)]
pub struct MeasurementTable;

impl Table for MeasurementTable {
    fn name(&self) -> &'static str {
        "measurements"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS measurements (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                event_id INTEGER NOT NULL,
                sensor_id INTEGER NOT NULL,
                timestamp TIMESTAMP NOT NULL,
                value JSON NOT NULL DEFAULT '{}',
                FOREIGN KEY (event_id) REFERENCES events (id) ON DELETE CASCADE,
                FOREIGN KEY (sensor_id) REFERENCES sensors (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS measurements;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["events", "sensors"]
    }
}
