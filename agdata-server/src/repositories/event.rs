use std::sync::Arc;

use sqlx::{Error, Pool, Sqlite, Transaction};
use time::UtcOffset;

use crate::configs::Storage;
use crate::models::Event;

#[derive(Clone)]
pub struct EventRepository {
    storage: Arc<Storage>,
}

impl EventRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &Pool<Sqlite> {
        self.storage.get_pool()
    }
}

impl EventRepository {
    pub async fn create(
        &self,
        item: &Event,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO events (venue_id, name, date, description)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(item.venue_id)
        .bind(&item.name)
        // Stored in UTC so the text column orders chronologically
        .bind(item.date.to_offset(UtcOffset::UTC))
        .bind(&item.description)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Event>, Error> {
        let event: Option<Event> = sqlx::query_as("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(event)
    }

    /// The event with the latest date, ties broken by the newest id.
    pub async fn find_latest(&self) -> Result<Option<Event>, Error> {
        let event: Option<Event> =
            sqlx::query_as("SELECT * FROM events ORDER BY date DESC, id DESC LIMIT 1")
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(event)
    }

    pub async fn find_all(&self) -> Result<Vec<Event>, Error> {
        let events: Vec<Event> = sqlx::query_as("SELECT * FROM events ORDER BY date, id")
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(events)
    }

    pub async fn find_by_venue_id(&self, venue_id: i32) -> Result<Vec<Event>, Error> {
        let events: Vec<Event> =
            sqlx::query_as("SELECT * FROM events WHERE venue_id = $1 ORDER BY date")
                .bind(venue_id)
                .fetch_all(self.storage.get_pool())
                .await?;

        Ok(events)
    }
}
