mod event;
mod measurement;
mod sensor;
mod sensor_type;
mod venue;

pub use event::{Event, EventTable};
pub use measurement::{Measurement, MeasurementTable};
pub use sensor::{Sensor, SensorTable};
pub use sensor_type::{SensorType, SensorTypeTable};
pub use venue::{Venue, VenueTable};

pub trait Table {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;

    /// The dependencies of the table
    fn dependencies(&self) -> Vec<&'static str>;
}

/// Any row of the data model, used where the record kind is only known at runtime.
#[derive(Debug, Clone)]
pub enum Record {
    Venue(Venue),
    Event(Event),
    SensorType(SensorType),
    Sensor(Sensor),
}

impl From<Venue> for Record {
    fn from(value: Venue) -> Self {
        Record::Venue(value)
    }
}

impl From<Event> for Record {
    fn from(value: Event) -> Self {
        Record::Event(value)
    }
}

impl From<SensorType> for Record {
    fn from(value: SensorType) -> Self {
        Record::SensorType(value)
    }
}

impl From<Sensor> for Record {
    fn from(value: Sensor) -> Self {
        Record::Sensor(value)
    }
}
