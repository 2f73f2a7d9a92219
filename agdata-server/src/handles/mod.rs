mod catalog_handle;
mod measurement_handle;
mod sensor_type_handle;

pub use catalog_handle::*;
pub use measurement_handle::*;
pub use sensor_type_handle::*;
