use std::sync::Arc;

use sqlx::{Error, Pool, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::Sensor;

#[derive(Clone)]
pub struct SensorRepository {
    storage: Arc<Storage>,
}

impl SensorRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &Pool<Sqlite> {
        self.storage.get_pool()
    }
}

impl SensorRepository {
    pub async fn create(
        &self,
        item: &Sensor,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO sensors (name, type_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(&item.name)
        .bind(item.type_id)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Sensor>, Error> {
        let sensor: Option<Sensor> = sqlx::query_as("SELECT * FROM sensors WHERE id = $1")
            .bind(id)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(sensor)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Sensor>, Error> {
        let sensor: Option<Sensor> = sqlx::query_as("SELECT * FROM sensors WHERE name = $1")
            .bind(name)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(sensor)
    }

    pub async fn find_by_type_id(&self, type_id: i32) -> Result<Vec<Sensor>, Error> {
        let sensors: Vec<Sensor> = sqlx::query_as("SELECT * FROM sensors WHERE type_id = $1")
            .bind(type_id)
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(sensors)
    }

    pub async fn find_all(&self) -> Result<Vec<Sensor>, Error> {
        let sensors: Vec<Sensor> = sqlx::query_as("SELECT * FROM sensors ORDER BY id")
            .fetch_all(self.storage.get_pool())
            .await?;

        Ok(sensors)
    }
}
