use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Sensor {
    pub id: i32,
    pub name: String,
    pub type_id: i32,
}

#[derive(Clone)]
pub struct SensorTable;

impl Table for SensorTable {
    fn name(&self) -> &'static str {
        "sensors"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS sensors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(255) NOT NULL UNIQUE,
                type_id INTEGER NOT NULL,
                FOREIGN KEY (type_id) REFERENCES sensor_types (id)
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS sensors;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["sensor_types"]
    }
}
