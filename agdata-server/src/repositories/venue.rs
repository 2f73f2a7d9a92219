use std::sync::Arc;

use sqlx::{Error, Pool, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Venue;

#[derive(Clone)]
pub struct VenueRepository {
    storage: Arc<Storage>,
}

impl VenueRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &Pool<Sqlite> {
        self.storage.get_pool()
    }
}

impl VenueRepository {
    pub async fn create(
        &self,
        item: &Venue,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO venues (name, description, latitude, longitude)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.latitude)
        .bind(item.longitude)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Venue>, Error> {
        let venue: Option<Venue> = sqlx::query_as("SELECT * FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(venue)
    }

    pub async fn find_all(&self) -> Result<Vec<Venue>, Error> {
        let venues: Vec<Venue> = sqlx::query_as("SELECT * FROM venues ORDER BY id")
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(venues)
    }
}
