mod catalog;
mod measurement;
mod sensor_type;

pub use catalog::*;
pub use measurement::*;
pub use sensor_type::*;

pub type Id = i32;
