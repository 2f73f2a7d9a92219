use crate::models::{EventTable, MeasurementTable, SensorTable, SensorTypeTable, Table, VenueTable};

pub struct SchemaManager {
    tables: Vec<Box<dyn Table>>,
}

impl SchemaManager {
    pub fn new(mut tables: Vec<Box<dyn Table>>) -> Self {
        Self::sort_tables(&mut tables);
        Self { tables }
    }

    fn sort_tables(tables: &mut Vec<Box<dyn Table>>) {
        let mut to_sort = std::mem::take(tables);
        let mut deps_list: Vec<_> = to_sort.iter().map(|t| t.dependencies()).collect();
        let mut sorted = Vec::with_capacity(to_sort.len());

        while !to_sort.is_empty() {
            let independent_indices: Vec<usize> = deps_list
                .iter()
                .enumerate()
                .filter(|(_, deps)| deps.is_empty())
                .map(|(i, _)| i)
                .collect();

            assert!(
                !independent_indices.is_empty(),
                "Circular dependency detected or unresolved dependencies exist."
            );

            for &index in independent_indices.iter().rev() {
                let table = to_sort.swap_remove(index);
                let _ = deps_list.swap_remove(index);
                sorted.push(table);
            }

            for deps in deps_list.iter_mut() {
                deps.retain(|dep_name| {
                    !sorted
                        .iter()
                        .any(|resolved_table| resolved_table.name() == *dep_name)
                });
            }
        }

        *tables = sorted;
    }

    pub fn create_schema(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.create()).collect()
    }

    pub fn dispose_schema(&self) -> Vec<String> {
        self.tables.iter().rev().map(|table| table.dispose()).collect()
    }
}

impl Default for SchemaManager {
    fn default() -> Self {
        SchemaManager::new(vec![
            Box::new(VenueTable),
            Box::new(EventTable),
            Box::new(SensorTypeTable),
            Box::new(SensorTable),
            Box::new(MeasurementTable),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockTable {
        name: &'static str,
        dependencies: Vec<&'static str>,
    }

    impl Table for MockTable {
        fn name(&self) -> &'static str {
            self.name
        }

        fn create(&self) -> String {
            format!("CREATE TABLE {};", self.name)
        }

        fn dispose(&self) -> String {
            format!("DROP TABLE {};", self.name)
        }

        fn dependencies(&self) -> Vec<&'static str> {
            self.dependencies.clone()
        }
    }

    fn mock(name: &'static str, dependencies: Vec<&'static str>) -> Box<dyn Table> {
        Box::new(MockTable { name, dependencies })
    }

    #[test]
    fn test_correct_creation_order() {
        let manager = SchemaManager::new(vec![
            mock("measurements", vec!["events", "sensors"]),
            mock("sensors", vec!["sensor_types"]),
            mock("events", vec!["venues"]),
            mock("sensor_types", vec![]),
            mock("venues", vec![]),
        ]);
        let statements = manager.create_schema();

        let position = |name: &str| {
            statements
                .iter()
                .position(|s| s == &format!("CREATE TABLE {name};"))
                .unwrap()
        };

        assert!(position("venues") < position("events"));
        assert!(position("sensor_types") < position("sensors"));
        assert!(position("events") < position("measurements"));
        assert!(position("sensors") < position("measurements"));
    }

    #[test]
    fn test_dispose_in_reverse_order() {
        let manager = SchemaManager::new(vec![
            mock("sensors", vec!["sensor_types"]),
            mock("sensor_types", vec![]),
        ]);

        assert_eq!(
            manager.dispose_schema(),
            vec!["DROP TABLE sensors;", "DROP TABLE sensor_types;"]
        );
    }

    #[test]
    #[should_panic(expected = "Circular dependency")]
    fn test_circular_dependency_panics() {
        SchemaManager::new(vec![mock("a", vec!["b"]), mock("b", vec!["a"])]);
    }
}
