use std::time::Duration;

use crate::client::WebClient;
use crate::error::NodeError;
use crate::gps::NmeaReceiver;
use crate::role::HardwareRole;
use crate::sensors::{SensePi, SimulatedSenseHat, default_sensor_ids};
use crate::settings::{SERVER_API_ENDPOINT, Settings};
use crate::transceiver::SerialTransceiver;

pub mod client;
pub mod error;
pub mod gps;
pub mod lan_server;
pub mod node;
pub mod retry;
pub mod role;
pub mod sensors;
pub mod settings;
pub mod transceiver;

pub async fn run(settings: &Settings, role: HardwareRole) -> Result<(), NodeError> {
    tracing::info!("{}", role);

    let retry = settings.retry_policy();
    let timeout = Duration::from_secs(settings.client.timeout_secs);

    match role {
        HardwareRole::CommRelay => {
            let transceiver = SerialTransceiver::open(&settings.transceiver)?;
            lan_server::run_server(&settings.lan_server, transceiver).await
        }
        HardwareRole::Sensor => {
            let sense = SensePi::new(SimulatedSenseHat::new(), default_sensor_ids());
            let client = WebClient::new(&settings.client.url, timeout)?;
            node::run_sensor_loop(sense, &client, &retry, settings.interval()).await
        }
        HardwareRole::Gps => {
            let receiver = NmeaReceiver::open(&settings.gps)?;
            let client = WebClient::new(&settings.client.url, timeout)?;
            node::run_gps_loop(
                receiver,
                settings.gps.sensor_id,
                &client,
                &retry,
                settings.interval(),
            )
            .await
        }
        HardwareRole::Relay => {
            let Some(url) = settings.server_api_endpoint.as_deref() else {
                tracing::warn!("{} not set", SERVER_API_ENDPOINT);
                return Ok(());
            };

            let transceiver = SerialTransceiver::open(&settings.transceiver)?;
            let client = WebClient::new(url, timeout)?;
            node::run_relay_loop(transceiver, &client, &retry).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::from_toml(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../configs/node.toml"
        )))
        .unwrap()
    }

    #[tokio::test]
    async fn test_relay_without_endpoint_exits_cleanly() {
        let mut settings = settings();
        settings.server_api_endpoint = None;
        // Never reached: the missing endpoint is checked before the port
        settings.transceiver.port_path = "/dev/agdata-missing-radio".to_string();

        assert!(run(&settings, HardwareRole::Relay).await.is_ok());
    }

    #[tokio::test]
    async fn test_relay_with_endpoint_needs_the_radio() {
        let mut settings = settings();
        settings.server_api_endpoint = Some("http://127.0.0.1:9/api/measurements".to_string());
        settings.transceiver.port_path = "/dev/agdata-missing-radio".to_string();

        assert!(matches!(
            run(&settings, HardwareRole::Relay).await,
            Err(NodeError::Serial(_))
        ));
    }
}
