//! Transport-level error types.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by serial transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The named serial port does not exist on this system.
    #[error("serial port not found: {0}")]
    NotFound(String),

    /// An I/O error occurred on the open port.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The link settings were rejected when opening the port.
    #[error("invalid link settings: {0}")]
    Settings(String),

    /// No data arrived within the configured read timeout.
    #[error("no response within {0:?}")]
    Timeout(Duration),

    /// An error reported by the underlying serial backend.
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

impl TransportError {
    pub fn not_found(port_name: impl Into<String>) -> Self {
        Self::NotFound(port_name.into())
    }

    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings(message.into())
    }

    pub fn timeout(duration: Duration) -> Self {
        Self::Timeout(duration)
    }

    /// Whether this error means "the deadline passed with no data" rather
    /// than a hard fault. The session treats these as end-of-response.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        let err = TransportError::not_found("/dev/ttyUSB9");
        assert_eq!(err.to_string(), "serial port not found: /dev/ttyUSB9");

        let err = TransportError::settings("unsupported baud rate");
        assert_eq!(err.to_string(), "invalid link settings: unsupported baud rate");
    }

    #[test]
    fn timeout_classification() {
        assert!(TransportError::timeout(Duration::from_millis(500)).is_timeout());
        assert!(TransportError::Io(io::Error::new(io::ErrorKind::TimedOut, "t")).is_timeout());
        assert!(TransportError::Io(io::Error::new(io::ErrorKind::WouldBlock, "w")).is_timeout());
        assert!(!TransportError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "b")).is_timeout());
        assert!(!TransportError::not_found("COM3").is_timeout());
    }
}
