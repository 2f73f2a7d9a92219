use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::error::NodeError;
use crate::settings::LanServer;
use crate::transceiver::Transceiver;

pub type SharedTransceiver = Arc<Mutex<Box<dyn Transceiver>>>;

pub fn shared(transceiver: impl Transceiver + 'static) -> SharedTransceiver {
    let transceiver: Box<dyn Transceiver> = Box::new(transceiver);
    Arc::new(Mutex::new(transceiver))
}

#[derive(Clone)]
pub struct RelayState {
    pub transceiver: SharedTransceiver,
}

pub fn relay_router(state: RelayState) -> Router {
    Router::new()
        .route("/", post(relay_payload))
        .with_state(state)
}

impl IntoResponse for NodeError {
    fn into_response(self) -> Response {
        tracing::error!("relay failed: {}", self);

        let body = json!({
            "error": {
                "code": StatusCode::BAD_GATEWAY.as_u16(),
                "message": self.to_string(),
            }
        });

        (StatusCode::BAD_GATEWAY, Json(body)).into_response()
    }
}

/// Writes the posted reading onto the radio link as one line.
pub async fn relay_payload(
    State(state): State<RelayState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, NodeError> {
    let line = serde_json::to_string(&payload)?;
    tracing::debug!("relaying {}", line);

    let transceiver = state.transceiver.clone();
    tokio::task::spawn_blocking(move || {
        let mut transceiver = transceiver
            .lock()
            .map_err(|_| NodeError::Transceiver("transceiver lock poisoned".to_string()))?;
        transceiver.send(&line)
    })
    .await??;

    Ok(Json(json!({ "status": "sent" })))
}

pub async fn run_server(
    settings: &LanServer,
    transceiver: impl Transceiver + 'static,
) -> Result<(), NodeError> {
    let ip_addr = settings
        .host
        .parse::<IpAddr>()
        .map_err(|e| NodeError::Config(format!("invalid LAN server host {}: {}", settings.host, e)))?;

    let address = SocketAddr::from((ip_addr, settings.port));
    let listener = TcpListener::bind(&address).await?;

    tracing::info!("listening on {:?}", address);

    let router = relay_router(RelayState {
        transceiver: shared(transceiver),
    });

    axum::serve(listener, router).await?;

    Ok(())
}
