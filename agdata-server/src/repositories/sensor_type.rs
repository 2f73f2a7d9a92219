use std::sync::Arc;

use sqlx::{Error, Executor, Pool, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::SensorType;

#[derive(Clone)]
pub struct SensorTypeRepository {
    storage: Arc<Storage>,
}

impl SensorTypeRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn get_pool(&self) -> &Pool<Sqlite> {
        self.storage.get_pool()
    }
}

impl SensorTypeRepository {
    /// Inserts the row with the id carried by `item`.
    pub async fn create(
        &self,
        item: &SensorType,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO sensor_types (id, name, processing_formula, format)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.processing_formula)
        .bind(&item.format)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<SensorType>, Error> {
        Self::find_by_id_with(self.storage.get_pool(), id).await
    }

    pub async fn find_by_id_with<'e, E>(executor: E, id: i32) -> Result<Option<SensorType>, Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sensor_type: Option<SensorType> =
            sqlx::query_as("SELECT * FROM sensor_types WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(sensor_type)
    }

    pub async fn find_all(&self) -> Result<Vec<SensorType>, Error> {
        let sensor_types: Vec<SensorType> =
            sqlx::query_as("SELECT * FROM sensor_types ORDER BY id")
                .fetch_all(self.storage.get_pool())
                .await?;

        Ok(sensor_types)
    }

    /// Highest id in the table, 0 when the table is empty.
    pub async fn max_id(&self) -> Result<i64, Error> {
        Self::max_id_with(self.storage.get_pool()).await
    }

    pub async fn max_id_with<'e, E>(executor: E) -> Result<i64, Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_scalar("SELECT COALESCE(MAX(id), 0) FROM sensor_types")
            .fetch_one(executor)
            .await
    }

    pub async fn count(&self) -> Result<i64, Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM sensor_types")
            .fetch_one(self.storage.get_pool())
            .await
    }

    pub async fn update(
        &self,
        id: i32,
        item: &SensorType,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE sensor_types
            SET name = $1, processing_formula = $2, format = $3
            WHERE id = $4
            "#,
        )
        .bind(&item.name)
        .bind(&item.processing_formula)
        .bind(&item.format)
        .bind(id)
        .execute(&mut **transaction)
        .await?;

        Ok(())
    }
}
