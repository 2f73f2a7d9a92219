use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::time::Duration;

use crate::error::NodeError;
use crate::settings::SerialLink;

/// Line-oriented radio link between the comm relay and the field nodes.
pub trait Transceiver: Send {
    fn send(&mut self, data: &str) -> Result<(), NodeError>;

    /// Waits for the next line. Returns `None` when nothing arrived in time.
    fn listen(&mut self) -> Result<Option<String>, NodeError>;
}

/// Newline-delimited transceiver over any byte stream.
pub struct LineTransceiver<S: Read + Write + Send> {
    stream: BufReader<S>,
    pending: String,
}

impl<S: Read + Write + Send> LineTransceiver<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream: BufReader::new(stream),
            pending: String::new(),
        }
    }
}

pub type SerialTransceiver = LineTransceiver<Box<dyn serialport::SerialPort>>;

impl SerialTransceiver {
    pub fn open(settings: &SerialLink) -> Result<Self, NodeError> {
        let port = serialport::new(&settings.port_path, settings.baud_rate)
            .timeout(Duration::from_millis(settings.timeout_ms))
            .open()?;

        tracing::info!(
            "Transceiver opened on {} at {} baud",
            settings.port_path,
            settings.baud_rate
        );

        Ok(Self::new(port))
    }
}

impl<S: Read + Write + Send> Transceiver for LineTransceiver<S> {
    fn send(&mut self, data: &str) -> Result<(), NodeError> {
        if data.contains('\n') {
            return Err(NodeError::Transceiver(
                "payload must fit on a single line".to_string(),
            ));
        }

        let port = self.stream.get_mut();
        port.write_all(data.as_bytes())?;
        port.write_all(b"\n")?;
        port.flush()?;

        Ok(())
    }

    fn listen(&mut self) -> Result<Option<String>, NodeError> {
        // A timeout may cut a line short, keep the partial part for next time
        match self.stream.read_line(&mut self.pending) {
            Ok(0) if self.pending.is_empty() => Ok(None),
            Ok(_) => Ok(Some(std::mem::take(&mut self.pending).trim().to_string())),
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                self.pending.clear();
                Err(NodeError::Transceiver("received non UTF-8 data".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_send_appends_newline() {
        let mut transceiver = LineTransceiver::new(Cursor::new(Vec::new()));
        transceiver.send(r#"{"sensor_id":2}"#).unwrap();

        let written = transceiver.stream.into_inner().into_inner();
        assert_eq!(written, b"{\"sensor_id\":2}\n");
    }

    #[test]
    fn test_send_rejects_multiline() {
        let mut transceiver = LineTransceiver::new(Cursor::new(Vec::new()));
        assert!(matches!(
            transceiver.send("a\nb"),
            Err(NodeError::Transceiver(_))
        ));
    }

    #[test]
    fn test_listen_reads_lines() {
        let mut transceiver =
            LineTransceiver::new(Cursor::new(b"{\"a\":1}\r\n\n{\"b\":2}".to_vec()));

        assert_eq!(transceiver.listen().unwrap().as_deref(), Some("{\"a\":1}"));
        assert_eq!(transceiver.listen().unwrap().as_deref(), Some(""));
        assert_eq!(transceiver.listen().unwrap().as_deref(), Some("{\"b\":2}"));
        assert_eq!(transceiver.listen().unwrap(), None);
    }
}
