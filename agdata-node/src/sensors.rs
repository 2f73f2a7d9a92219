use std::collections::HashMap;

use agdata_api::models::{Id, SensorPayload};
use rand::Rng;
use serde_json::json;
use time::OffsetDateTime;

use crate::error::NodeError;

/// Readings of the environment board, in the order they are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorChannel {
    Temperature,
    Pressure,
    Humidity,
    Acceleration,
    Orientation,
}

impl SensorChannel {
    pub const ALL: [SensorChannel; 5] = [
        SensorChannel::Temperature,
        SensorChannel::Pressure,
        SensorChannel::Humidity,
        SensorChannel::Acceleration,
        SensorChannel::Orientation,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SensorChannel::Temperature => "TEMPERATURE",
            SensorChannel::Pressure => "PRESSURE",
            SensorChannel::Humidity => "HUMIDITY",
            SensorChannel::Acceleration => "ACCELERATION",
            SensorChannel::Orientation => "ORIENTATION",
        }
    }
}

/// Sensor ids registered for the environment board's channels.
pub fn default_sensor_ids() -> HashMap<SensorChannel, Id> {
    HashMap::from([
        (SensorChannel::Temperature, 2),
        (SensorChannel::Pressure, 3),
        (SensorChannel::Humidity, 4),
        (SensorChannel::Acceleration, 5),
        (SensorChannel::Orientation, 6),
    ])
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axes {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attitude {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

/// Raw access to an environment sensor board.
pub trait EnvironmentSensor: Send {
    /// Degrees Celsius
    fn temperature(&mut self) -> Result<f64, NodeError>;
    /// Millibars
    fn pressure(&mut self) -> Result<f64, NodeError>;
    /// Relative humidity in percent
    fn humidity(&mut self) -> Result<f64, NodeError>;
    /// Acceleration in g
    fn acceleration(&mut self) -> Result<Axes, NodeError>;
    /// Orientation in degrees
    fn orientation(&mut self) -> Result<Attitude, NodeError>;
}

/// Board stand-in that follows a daily cycle with some noise.
pub struct SimulatedSenseHat {
    clock: fn() -> OffsetDateTime,
}

impl SimulatedSenseHat {
    pub fn new() -> Self {
        Self {
            clock: OffsetDateTime::now_utc,
        }
    }

    pub fn with_clock(clock: fn() -> OffsetDateTime) -> Self {
        Self { clock }
    }

    fn day_fraction(&self) -> f64 {
        let (hour, minute, second) = (self.clock)().time().as_hms();
        (hour as f64 * 3600.0 + minute as f64 * 60.0 + second as f64) / 86400.0
    }
}

impl Default for SimulatedSenseHat {
    fn default() -> Self {
        Self::new()
    }
}

pub fn simulated_temperature(day_fraction: f64) -> f64 {
    // Coldest around 04:00, warmest around 16:00
    let radians = (day_fraction - 0.25) * 2.0 * std::f64::consts::PI;
    ((radians.sin() * 8.0 + 18.0) * 10.0).round() / 10.0
}

pub fn simulated_humidity(day_fraction: f64) -> f64 {
    let radians = day_fraction * 2.0 * std::f64::consts::PI;

    if (0.3..=0.7).contains(&day_fraction) {
        ((radians.sin().max(0.0) * 25.0) + 40.0).round()
    } else {
        ((radians.cos().max(0.0) * 30.0) + 60.0).round()
    }
}

impl EnvironmentSensor for SimulatedSenseHat {
    fn temperature(&mut self) -> Result<f64, NodeError> {
        let noise = rand::rng().random_range(-0.3..0.3);
        Ok(simulated_temperature(self.day_fraction()) + noise)
    }

    fn pressure(&mut self) -> Result<f64, NodeError> {
        // Standard pressure with a small fluctuation
        Ok(1013.25 + rand::rng().random_range(-3.0..3.0))
    }

    fn humidity(&mut self) -> Result<f64, NodeError> {
        Ok(simulated_humidity(self.day_fraction()))
    }

    fn acceleration(&mut self) -> Result<Axes, NodeError> {
        let mut rng = rand::rng();
        Ok(Axes {
            x: rng.random_range(-0.02..0.02),
            y: rng.random_range(-0.02..0.02),
            z: 1.0 + rng.random_range(-0.02..0.02),
        })
    }

    fn orientation(&mut self) -> Result<Attitude, NodeError> {
        let mut rng = rand::rng();
        Ok(Attitude {
            roll: rng.random_range(0.0..1.0),
            pitch: rng.random_range(0.0..1.0),
            yaw: rng.random_range(0.0..360.0),
        })
    }
}

/// Turns raw board readings into payloads tagged with their sensor ids.
pub struct SensePi<S: EnvironmentSensor> {
    sensor: S,
    sensor_ids: HashMap<SensorChannel, Id>,
}

impl<S: EnvironmentSensor> SensePi<S> {
    pub fn new(sensor: S, sensor_ids: HashMap<SensorChannel, Id>) -> Self {
        Self { sensor, sensor_ids }
    }

    fn sensor_id(&self, channel: SensorChannel) -> Result<Id, NodeError> {
        self.sensor_ids
            .get(&channel)
            .copied()
            .ok_or_else(|| NodeError::Sensor(format!("no sensor id for {}", channel.key())))
    }

    pub fn read(&mut self, channel: SensorChannel) -> Result<SensorPayload, NodeError> {
        let sensor_id = self.sensor_id(channel)?;
        let values = match channel {
            SensorChannel::Temperature => json!({ "temperature": self.sensor.temperature()? }),
            SensorChannel::Pressure => json!({ "pressure": self.sensor.pressure()? }),
            SensorChannel::Humidity => json!({ "humidity": self.sensor.humidity()? }),
            SensorChannel::Acceleration => {
                let Axes { x, y, z } = self.sensor.acceleration()?;
                json!({ "x": x, "y": y, "z": z })
            }
            SensorChannel::Orientation => {
                let Attitude { roll, pitch, yaw } = self.sensor.orientation()?;
                json!({ "roll": roll, "pitch": pitch, "yaw": yaw })
            }
        };

        Ok(SensorPayload {
            sensor_id,
            values,
            date: OffsetDateTime::now_utc(),
            event_id: None,
        })
    }

    pub fn read_all(&mut self) -> Result<Vec<SensorPayload>, NodeError> {
        SensorChannel::ALL
            .iter()
            .map(|channel| self.read(*channel))
            .collect()
    }
}
