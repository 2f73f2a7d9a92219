use std::sync::Arc;

use sqlx::{Error, Pool, Sqlite, Transaction};
use time::UtcOffset;

use crate::configs::Storage;
use crate::models::Measurement;

#[derive(Clone)]
pub struct MeasurementRepository {
    storage: Arc<Storage>,
}

impl MeasurementRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &Pool<Sqlite> {
        self.storage.get_pool()
    }
}

impl MeasurementRepository {
    pub async fn create(
        &self,
        item: &Measurement,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO measurements (event_id, sensor_id, timestamp, value)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(item.event_id)
        .bind(item.sensor_id)
        .bind(item.timestamp.to_offset(UtcOffset::UTC))
        .bind(&item.value)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Measurement>, Error> {
        let measurement: Option<Measurement> =
            sqlx::query_as("SELECT * FROM measurements WHERE id = $1")
                .bind(id)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(measurement)
    }

    pub async fn find_by_sensor_id(&self, sensor_id: i32) -> Result<Vec<Measurement>, Error> {
        let measurements: Vec<Measurement> = sqlx::query_as(
            "SELECT * FROM measurements WHERE sensor_id = $1 ORDER BY timestamp",
        )
        .bind(sensor_id)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(measurements)
    }
}
