mod event;
mod measurement;
mod sensor;
mod sensor_type;
mod venue;

pub use event::EventRepository;
pub use measurement::MeasurementRepository;
pub use sensor::SensorRepository;
pub use sensor_type::SensorTypeRepository;
pub use venue::VenueRepository;
