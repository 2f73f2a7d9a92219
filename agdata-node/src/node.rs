use std::time::Duration;

use serde_json::Value;

use crate::client::Uplink;
use crate::error::NodeError;
use crate::gps::LocationSource;
use crate::retry::RetryPolicy;
use crate::sensors::{EnvironmentSensor, SensePi};
use crate::transceiver::Transceiver;

/// Runs a blocking call on the blocking pool, handing the resource back
/// together with the result.
async fn blocking<T, R, F>(mut resource: T, f: F) -> Result<(T, R), NodeError>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnOnce(&mut T) -> R + Send + 'static,
{
    Ok(tokio::task::spawn_blocking(move || {
        let result = f(&mut resource);
        (resource, result)
    })
    .await?)
}

/// Sends one payload, retrying transient failures. The last failure is
/// logged and returned.
pub async fn forward(
    uplink: &dyn Uplink,
    retry: &RetryPolicy,
    payload: &Value,
) -> Result<(), NodeError> {
    retry
        .run(|| uplink.ping(payload))
        .await
        .inspect_err(|err| tracing::error!("error occurred: {}", err))
}

/// Reads every channel once and forwards each reading on its own.
pub async fn sense_cycle<S: EnvironmentSensor>(
    sense: &mut SensePi<S>,
    uplink: &dyn Uplink,
    retry: &RetryPolicy,
    interval: Duration,
) -> Result<(), NodeError> {
    for payload in sense.read_all()? {
        let payload = serde_json::to_value(&payload)?;
        tracing::info!("{}", payload);

        forward(uplink, retry, &payload).await?;
        tokio::time::sleep(interval).await;
    }

    Ok(())
}

pub async fn run_sensor_loop<S: EnvironmentSensor>(
    mut sense: SensePi<S>,
    uplink: &dyn Uplink,
    retry: &RetryPolicy,
    interval: Duration,
) -> Result<(), NodeError> {
    loop {
        sense_cycle(&mut sense, uplink, retry, interval).await?;
    }
}

pub async fn gps_cycle<L: LocationSource + 'static>(
    source: L,
    sensor_id: i32,
    uplink: &dyn Uplink,
    retry: &RetryPolicy,
    interval: Duration,
) -> Result<L, NodeError> {
    let (source, location) = blocking(source, |source| source.locate()).await?;

    match location? {
        Some(location) => {
            let payload = serde_json::to_value(location.to_payload(sensor_id))?;
            tracing::info!("{}", payload);
            forward(uplink, retry, &payload).await?;
        }
        None => tracing::debug!("no GPS fix, skipping cycle"),
    }

    tokio::time::sleep(interval).await;

    Ok(source)
}

pub async fn run_gps_loop<L: LocationSource + 'static>(
    mut source: L,
    sensor_id: i32,
    uplink: &dyn Uplink,
    retry: &RetryPolicy,
    interval: Duration,
) -> Result<(), NodeError> {
    loop {
        source = gps_cycle(source, sensor_id, uplink, retry, interval).await?;
    }
}

/// Waits for one line from the radio link and forwards it upstream.
pub async fn relay_cycle<T: Transceiver + 'static>(
    transceiver: T,
    uplink: &dyn Uplink,
    retry: &RetryPolicy,
) -> Result<T, NodeError> {
    let (transceiver, data) = blocking(transceiver, |transceiver| transceiver.listen()).await?;

    let data = match data? {
        Some(data) if !data.is_empty() => data,
        _ => return Ok(transceiver),
    };

    tracing::info!("{}", data);

    match serde_json::from_str::<Value>(&data) {
        Ok(payload) => forward(uplink, retry, &payload).await?,
        Err(e) => tracing::warn!("dropping malformed line from transceiver: {}", e),
    }

    Ok(transceiver)
}

pub async fn run_relay_loop<T: Transceiver + 'static>(
    mut transceiver: T,
    uplink: &dyn Uplink,
    retry: &RetryPolicy,
) -> Result<(), NodeError> {
    loop {
        transceiver = relay_cycle(transceiver, uplink, retry).await?;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::json;
    use tokio::time::Instant;

    use super::*;
    use crate::gps::Geolocation;
    use crate::sensors::default_sensor_ids;
    use crate::sensors::tests::FixedBoard;

    #[derive(Default)]
    pub struct RecordingUplink {
        pub received: Mutex<Vec<Value>>,
        pub failures_left: Mutex<u32>,
        pub calls: Mutex<u32>,
    }

    impl RecordingUplink {
        pub fn failing(times: u32) -> Self {
            Self {
                failures_left: Mutex::new(times),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl Uplink for RecordingUplink {
        async fn ping(&self, payload: &Value) -> Result<(), NodeError> {
            *self.calls.lock().unwrap() += 1;

            let mut failures_left = self.failures_left.lock().unwrap();
            if *failures_left > 0 {
                *failures_left -= 1;
                return Err(NodeError::Status {
                    url: "http://lan/".to_string(),
                    status: 503,
                });
            }

            self.received.lock().unwrap().push(payload.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct RecordingTransceiver {
        pub sent: Arc<Mutex<Vec<String>>>,
        pub incoming: VecDeque<Option<String>>,
        pub fail_sends: bool,
    }

    impl Transceiver for RecordingTransceiver {
        fn send(&mut self, data: &str) -> Result<(), NodeError> {
            if self.fail_sends {
                return Err(NodeError::Transceiver("radio offline".to_string()));
            }

            self.sent.lock().unwrap().push(data.to_string());
            Ok(())
        }

        fn listen(&mut self) -> Result<Option<String>, NodeError> {
            Ok(self.incoming.pop_front().flatten())
        }
    }

    struct ScriptedGps(VecDeque<Option<Geolocation>>);

    impl LocationSource for ScriptedGps {
        fn locate(&mut self) -> Result<Option<Geolocation>, NodeError> {
            Ok(self.0.pop_front().flatten())
        }
    }

    fn retry() -> RetryPolicy {
        RetryPolicy {
            attempts: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sense_cycle_sends_each_channel_paced() {
        let uplink = RecordingUplink::default();
        let mut sense = SensePi::new(FixedBoard, default_sensor_ids());
        let started = Instant::now();

        sense_cycle(&mut sense, &uplink, &retry(), Duration::from_secs(1))
            .await
            .unwrap();

        let received = uplink.received.lock().unwrap();
        let ids: Vec<i64> = received
            .iter()
            .map(|p| p["sensor_id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 3, 4, 5, 6]);
        assert_eq!(received[1]["values"], json!({"pressure": 1012.0}));
        assert!(received[0]["date"].is_string());
        assert_eq!(started.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sense_cycle_retries_then_continues() {
        let uplink = RecordingUplink::failing(2);
        let mut sense = SensePi::new(FixedBoard, default_sensor_ids());

        sense_cycle(&mut sense, &uplink, &retry(), Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(uplink.received.lock().unwrap().len(), 5);
        assert_eq!(*uplink.calls.lock().unwrap(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sense_cycle_propagates_exhausted_send() {
        let uplink = RecordingUplink::failing(u32::MAX);
        let mut sense = SensePi::new(FixedBoard, default_sensor_ids());

        let err = sense_cycle(&mut sense, &uplink, &retry(), Duration::from_secs(1))
            .await
            .unwrap_err();

        assert!(matches!(err, NodeError::Status { status: 503, .. }));
        assert_eq!(*uplink.calls.lock().unwrap(), 3);
        assert!(uplink.received.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_gps_cycle_skips_without_fix() {
        let uplink = RecordingUplink::default();
        let fix = Geolocation {
            latitude: 40.82,
            longitude: -96.7,
            altitude: Some(361.0),
            satellites: 9,
        };
        let source = ScriptedGps(VecDeque::from([None, Some(fix)]));

        let source = gps_cycle(source, 7, &uplink, &retry(), Duration::from_secs(1))
            .await
            .unwrap();
        assert!(uplink.received.lock().unwrap().is_empty());

        gps_cycle(source, 7, &uplink, &retry(), Duration::from_secs(1))
            .await
            .unwrap();

        let received = uplink.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0]["sensor_id"], json!(7));
        assert_eq!(received[0]["values"]["satellites"], json!(9));
    }

    #[tokio::test(start_paused = true)]
    async fn test_relay_cycle_forwards_json_lines() {
        let uplink = RecordingUplink::default();
        let mut transceiver = RecordingTransceiver {
            incoming: VecDeque::from([
                None,
                Some(String::new()),
                Some("{broken".to_string()),
                Some(r#"{"sensor_id":4,"values":{"humidity":55.0}}"#.to_string()),
            ]),
            ..Default::default()
        };

        for _ in 0..4 {
            transceiver = relay_cycle(transceiver, &uplink, &retry()).await.unwrap();
        }

        assert_eq!(
            *uplink.received.lock().unwrap(),
            vec![json!({"sensor_id": 4, "values": {"humidity": 55.0}})]
        );
        assert_eq!(*uplink.calls.lock().unwrap(), 1);
    }
}
