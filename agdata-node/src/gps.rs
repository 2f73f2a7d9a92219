use std::io::{ErrorKind, Read};
use std::time::Duration;

use agdata_api::models::{Id, SensorPayload};
use nmea0183::{ParseResult, Parser};
use serde_json::json;
use time::OffsetDateTime;

use crate::error::NodeError;
use crate::settings;

/// Position reported by a GGA sentence with a valid fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geolocation {
    /// Degrees, north positive
    pub latitude: f64,
    /// Degrees, east positive
    pub longitude: f64,
    /// Meters above mean sea level
    pub altitude: Option<f32>,
    pub satellites: u8,
}

impl Geolocation {
    pub fn to_payload(&self, sensor_id: Id) -> SensorPayload {
        SensorPayload {
            sensor_id,
            values: json!({
                "latitude": self.latitude,
                "longitude": self.longitude,
                "altitude": self.altitude,
                "satellites": self.satellites,
            }),
            date: OffsetDateTime::now_utc(),
            event_id: None,
        }
    }
}

pub trait LocationSource: Send {
    /// Returns `None` when no fix was reported.
    fn locate(&mut self) -> Result<Option<Geolocation>, NodeError>;
}

/// Reads NMEA sentences from a byte stream until a GGA fix shows up.
pub struct NmeaReceiver<R: Read + Send> {
    reader: R,
    parser: Parser,
    max_sentences: usize,
}

impl<R: Read + Send> NmeaReceiver<R> {
    pub fn new(reader: R, max_sentences: usize) -> Self {
        Self {
            reader,
            parser: Parser::new(),
            max_sentences,
        }
    }
}

impl NmeaReceiver<Box<dyn serialport::SerialPort>> {
    pub fn open(settings: &settings::Gps) -> Result<Self, NodeError> {
        let port = serialport::new(&settings.port_path, settings.baud_rate)
            .timeout(Duration::from_millis(settings.timeout_ms))
            .open()?;

        tracing::info!("GPS receiver opened on {}", settings.port_path);

        Ok(Self::new(port, settings.max_sentences))
    }
}

impl<R: Read + Send> LocationSource for NmeaReceiver<R> {
    fn locate(&mut self) -> Result<Option<Geolocation>, NodeError> {
        let mut sentences = 0;
        let mut buf = [0u8; 64];

        while sentences < self.max_sentences {
            let read_count = match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::TimedOut => return Ok(None),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            for &byte in buf.iter().take(read_count) {
                let Some(result) = self.parser.parse_from_byte(byte) else {
                    continue;
                };
                sentences += 1;

                match result {
                    Ok(ParseResult::GGA(Some(gga))) => {
                        return Ok(Some(Geolocation {
                            latitude: gga.latitude.as_f64(),
                            longitude: gga.longitude.as_f64(),
                            altitude: Some(gga.altitude.meters),
                            satellites: gga.sat_in_use,
                        }));
                    }
                    Ok(_) => {}
                    Err(e) => tracing::debug!("discarding NMEA sentence: {}", e),
                }

                if sentences >= self.max_sentences {
                    return Ok(None);
                }
            }
        }

        Ok(None)
    }
}
