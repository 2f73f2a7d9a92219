#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server at {url} answered {status}")]
    Status { url: String, status: u16 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("Sensor error: {0}")]
    Sensor(String),

    #[error("Transceiver error: {0}")]
    Transceiver(String),

    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
