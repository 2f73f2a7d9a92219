use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::NodeError;
use crate::settings::HARDWARE_TYPE;

/// What a node does, picked once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareRole {
    /// Accepts readings over the LAN and pushes them onto the radio link
    CommRelay,
    /// Polls the attached environment sensors
    Sensor,
    /// Polls the attached GPS receiver
    Gps,
    /// Listens on the radio link and forwards to the data service
    Relay,
}

impl HardwareRole {
    pub fn from_env() -> Result<Self, NodeError> {
        let value = env::var(HARDWARE_TYPE)
            .map_err(|_| NodeError::Config(format!("{HARDWARE_TYPE} is not set")))?;

        // Parsing never fails, unknown values select the generic relay
        Ok(value.parse().unwrap_or(HardwareRole::Relay))
    }
}

impl FromStr for HardwareRole {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "commPi" => HardwareRole::CommRelay,
            "sensePi" => HardwareRole::Sensor,
            "gpsPi" => HardwareRole::Gps,
            _ => HardwareRole::Relay,
        })
    }
}

impl fmt::Display for HardwareRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareRole::CommRelay => write!(f, "CommunicationsPi"),
            HardwareRole::Sensor => write!(f, "SensePi"),
            HardwareRole::Gps => write!(f, "GpsPi"),
            HardwareRole::Relay => write!(f, "Local Django Server"),
        }
    }
}
