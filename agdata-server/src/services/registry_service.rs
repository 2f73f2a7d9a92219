use std::sync::Arc;

use serde_json::Value;

use crate::errors::RegistryError;
use crate::models::{Event, Record, Sensor, SensorType, Venue};
use crate::repositories::SensorTypeRepository;
use crate::services::presets::{SensorTypePreset, built_in_sensor_types};

/// Next free custom sensor type id after `max_id`.
///
/// The result is always odd and strictly greater than `max_id`, so even ids
/// stay reserved for presets. An empty table (`max_id == 0`) yields 1.
/// Returns `None` once the id space is used up.
pub fn next_sensor_type_id(max_id: i64) -> Option<i32> {
    let max_id = i32::try_from(max_id).ok()?;

    if max_id.rem_euclid(2) == 0 {
        max_id.checked_add(1)
    } else {
        max_id.checked_add(2)
    }
}

pub fn assert_venue(record: &Record) -> Result<&Venue, RegistryError> {
    match record {
        Record::Venue(venue) => Ok(venue),
        _ => Err(RegistryError::Assertion("Missing an instance of AGVenue.")),
    }
}

pub fn assert_event(record: &Record) -> Result<&Event, RegistryError> {
    match record {
        Record::Event(event) => Ok(event),
        _ => Err(RegistryError::Assertion("Missing an instance of AGEvent.")),
    }
}

pub fn assert_sensor_type(record: &Record) -> Result<&SensorType, RegistryError> {
    match record {
        Record::SensorType(sensor_type) => Ok(sensor_type),
        _ => Err(RegistryError::Assertion("Not an instance of AGSensorType.")),
    }
}

pub fn assert_sensor(record: &Record) -> Result<&Sensor, RegistryError> {
    match record {
        Record::Sensor(sensor) => Ok(sensor),
        _ => Err(RegistryError::Assertion("Missing an instance of AGSensor.")),
    }
}

pub struct SensorTypeRegistry {
    sensor_type_repository: Arc<SensorTypeRepository>,
    presets: Vec<SensorTypePreset>,
}

impl SensorTypeRegistry {
    pub fn new(sensor_type_repository: Arc<SensorTypeRepository>) -> Self {
        Self::with_presets(sensor_type_repository, built_in_sensor_types())
    }

    pub fn with_presets(
        sensor_type_repository: Arc<SensorTypeRepository>,
        presets: Vec<SensorTypePreset>,
    ) -> Self {
        Self {
            sensor_type_repository,
            presets,
        }
    }

    pub fn presets(&self) -> &[SensorTypePreset] {
        &self.presets
    }

    /// Applies every preset in order and stops at the first failure.
    pub async fn create_or_reset_all_built_in_sensor_types(
        &self,
    ) -> Result<Vec<SensorType>, RegistryError> {
        let mut sensor_types = Vec::with_capacity(self.presets.len());

        for index in 0..self.presets.len() {
            let sensor_type = self
                .create_or_reset_built_in_sensor_type_at_preset_index(index)
                .await?;
            sensor_types.push(sensor_type);
        }

        tracing::info!("{} built-in sensor types in place", sensor_types.len());

        Ok(sensor_types)
    }

    /// Creates the preset's row, or overwrites name, formula and format when a
    /// row with the preset's id already exists.
    pub async fn create_or_reset_built_in_sensor_type_at_preset_index(
        &self,
        index: usize,
    ) -> Result<SensorType, RegistryError> {
        let preset = self
            .presets
            .get(index)
            .ok_or(RegistryError::PresetIndexOutOfRange {
                index,
                len: self.presets.len(),
            })?;

        let sensor_type = preset.to_sensor_type();

        let mut tx = self.sensor_type_repository.get_pool().begin().await?;

        match SensorTypeRepository::find_by_id_with(&mut *tx, preset.id).await? {
            None => {
                self.sensor_type_repository
                    .create(&sensor_type, &mut tx)
                    .await?;
                tracing::debug!("created built-in sensor type {} ({})", preset.id, preset.name);
            }
            Some(_) => {
                self.sensor_type_repository
                    .update(preset.id, &sensor_type, &mut tx)
                    .await?;
                tracing::debug!("reset built-in sensor type {} ({})", preset.id, preset.name);
            }
        }

        let record = SensorTypeRepository::find_by_id_with(&mut *tx, preset.id)
            .await?
            .ok_or(RegistryError::SensorTypeNotFound)?;

        tx.commit().await?;

        Ok(record)
    }

    pub async fn create_custom_sensor_type(
        &self,
        name: &str,
        processing_formula: &str,
        format: Value,
    ) -> Result<SensorType, RegistryError> {
        let mut tx = self.sensor_type_repository.get_pool().begin().await?;

        // Allocation and insert share the transaction so two callers cannot
        // be handed the same id.
        let max_id = SensorTypeRepository::max_id_with(&mut *tx).await?;
        let sensor_type = SensorType {
            id: next_sensor_type_id(max_id).ok_or(RegistryError::IdSpaceExhausted)?,
            name: name.to_string(),
            processing_formula: processing_formula.to_string(),
            format,
        };

        self.sensor_type_repository
            .create(&sensor_type, &mut tx)
            .await?;

        tx.commit().await?;

        tracing::info!("created custom sensor type {} ({})", sensor_type.id, sensor_type.name);

        Ok(sensor_type)
    }

    pub async fn get_next_available_sensor_type_id(&self) -> Result<i32, RegistryError> {
        let max_id = self.sensor_type_repository.max_id().await?;

        next_sensor_type_id(max_id).ok_or(RegistryError::IdSpaceExhausted)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::tests::*;

    use super::*;

    async fn setup_registry(presets: Vec<SensorTypePreset>) -> (SensorTypeRegistry, Arc<SensorTypeRepository>) {
        let storage = setup_test_db().await;
        let repository = Arc::new(SensorTypeRepository::new(storage));
        let registry = SensorTypeRegistry::with_presets(repository.clone(), presets);

        (registry, repository)
    }

    #[test]
    fn test_next_id_is_odd_and_greater() {
        for max_id in 0..50 {
            let next = next_sensor_type_id(max_id).unwrap();
            assert_eq!(next % 2, 1, "next id after {max_id} must be odd");
            assert!(i64::from(next) > max_id);
        }

        assert_eq!(next_sensor_type_id(0), Some(1));
        assert_eq!(next_sensor_type_id(1), Some(3));
        assert_eq!(next_sensor_type_id(12), Some(13));
    }

    #[test]
    fn test_next_id_at_the_top_of_the_range() {
        assert_eq!(next_sensor_type_id(i64::from(i32::MAX) - 1), Some(i32::MAX));
        assert_eq!(next_sensor_type_id(i64::from(i32::MAX) - 2), None);
        assert_eq!(next_sensor_type_id(i64::from(i32::MAX)), None);
        assert_eq!(next_sensor_type_id(i64::from(i32::MAX) + 1), None);
    }

    #[tokio::test]
    async fn test_custom_type_fails_when_ids_run_out() {
        let (registry, repository) = setup_registry(Vec::new()).await;

        let mut tx = repository.get_pool().begin().await.unwrap();
        repository
            .create(
                &SensorType {
                    id: i32::MAX,
                    name: "Last".to_string(),
                    processing_formula: "x".to_string(),
                    format: json!({}),
                },
                &mut tx,
            )
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let err = registry
            .create_custom_sensor_type("Overflow", "x", json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::IdSpaceExhausted));
        assert!(matches!(
            registry.get_next_available_sensor_type_id().await,
            Err(RegistryError::IdSpaceExhausted)
        ));
    }

    #[test]
    fn test_assertions_carry_fixed_messages() {
        let sensor: Record = Sensor {
            id: 1,
            name: "Probe".to_string(),
            type_id: 2,
        }
        .into();

        assert!(assert_sensor(&sensor).is_ok());
        assert_eq!(
            assert_venue(&sensor).unwrap_err().to_string(),
            "Missing an instance of AGVenue."
        );
        assert_eq!(
            assert_event(&sensor).unwrap_err().to_string(),
            "Missing an instance of AGEvent."
        );
        assert_eq!(
            assert_sensor_type(&sensor).unwrap_err().to_string(),
            "Not an instance of AGSensorType."
        );

        let sensor_type: Record = SensorTypePreset::new(2, "Temperature", "x", json!({}))
            .to_sensor_type()
            .into();
        assert_eq!(
            assert_sensor(&sensor_type).unwrap_err().to_string(),
            "Missing an instance of AGSensor."
        );
    }

    #[tokio::test]
    async fn test_next_available_id_on_empty_table() {
        let (registry, _) = setup_registry(vec![]).await;

        assert_eq!(registry.get_next_available_sensor_type_id().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_custom_types_are_allocated_odd_ids() {
        let (registry, _) = setup_registry(vec![]).await;

        let first = registry
            .create_custom_sensor_type("Soil Moisture", "x / 1023", json!({}))
            .await
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(registry.get_next_available_sensor_type_id().await.unwrap(), 3);

        let second = registry
            .create_custom_sensor_type("Leaf Wetness", "x", json!({}))
            .await
            .unwrap();
        assert_eq!(second.id, 3);
    }

    #[tokio::test]
    async fn test_custom_type_after_built_ins_skips_even_ids() {
        let (registry, _) = setup_registry(built_in_sensor_types()).await;
        registry
            .create_or_reset_all_built_in_sensor_types()
            .await
            .unwrap();

        let custom = registry
            .create_custom_sensor_type("Wind Speed", "x * 0.44704", json!({"speed": {}}))
            .await
            .unwrap();

        assert_eq!(custom.id, 13);
    }

    #[tokio::test]
    async fn test_reset_all_creates_one_row_per_preset() {
        let presets = built_in_sensor_types();
        let (registry, repository) = setup_registry(presets.clone()).await;

        let created = registry
            .create_or_reset_all_built_in_sensor_types()
            .await
            .unwrap();

        assert_eq!(created.len(), presets.len());
        assert_eq!(repository.count().await.unwrap(), presets.len() as i64);
        for preset in &presets {
            let row = repository.find_by_id(preset.id).await.unwrap().unwrap();
            assert_eq!(row, preset.to_sensor_type());
        }
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let (registry, repository) = setup_registry(built_in_sensor_types()).await;

        for index in 0..registry.presets().len() {
            let first = registry
                .create_or_reset_built_in_sensor_type_at_preset_index(index)
                .await
                .unwrap();
            let second = registry
                .create_or_reset_built_in_sensor_type_at_preset_index(index)
                .await
                .unwrap();
            assert_eq!(first, second);
        }

        assert_eq!(
            repository.count().await.unwrap(),
            registry.presets().len() as i64
        );
    }

    #[tokio::test]
    async fn test_reapplying_changed_preset_updates_in_place() {
        let storage = setup_test_db().await;
        let repository = Arc::new(SensorTypeRepository::new(storage));

        let original = SensorTypeRegistry::with_presets(
            repository.clone(),
            vec![SensorTypePreset::new(2, "Temperature", "x", json!({}))],
        );
        original
            .create_or_reset_all_built_in_sensor_types()
            .await
            .unwrap();

        let renamed = SensorTypeRegistry::with_presets(
            repository.clone(),
            vec![SensorTypePreset::new(2, "Air Temperature", "x - 0.5", json!({"t": {}}))],
        );
        renamed
            .create_or_reset_all_built_in_sensor_types()
            .await
            .unwrap();

        let rows = repository.find_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 2);
        assert_eq!(rows[0].name, "Air Temperature");
        assert_eq!(rows[0].processing_formula, "x - 0.5");
        assert_eq!(rows[0].format, json!({"t": {}}));
    }

    #[tokio::test]
    async fn test_out_of_range_index_fails() {
        let (registry, repository) = setup_registry(built_in_sensor_types()).await;
        let len = registry.presets().len();

        let err = registry
            .create_or_reset_built_in_sensor_type_at_preset_index(len)
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::PresetIndexOutOfRange { index, .. } if index == len));
        assert_eq!(
            err.to_string(),
            format!("Cannot find requested sensor type (index {len}) from presets")
        );
        assert_eq!(repository.count().await.unwrap(), 0);
    }
}
