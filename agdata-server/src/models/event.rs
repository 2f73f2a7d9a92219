use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use super::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Event {
    pub id: i32,
    pub venue_id: i32,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub date: OffsetDateTime,
    pub description: String,
}

#[derive(Clone)]
pub struct EventTable;

impl Table for EventTable {
    fn name(&self) -> &'static str {
        "events"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                venue_id INTEGER NOT NULL,
                name VARCHAR(255) NOT NULL,
                date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                description TEXT NOT NULL DEFAULT '',
                FOREIGN KEY (venue_id) REFERENCES venues (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS events;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["venues"]
    }
}
