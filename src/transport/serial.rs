//! Blocking serial link over the `serialport` backend.

use super::error::TransportError;
use super::settings::LinkSettings;
use super::SerialTransport;
use std::io::{Read, Write};
use std::time::Duration;

/// A real serial port opened for the lifetime of a session.
pub struct SerialLink {
    port: Box<dyn serialport::SerialPort>,
    name: String,
}

impl SerialLink {
    /// Open `port_name` with the given link settings.
    ///
    /// Open failures are classified: a missing device maps to
    /// [`TransportError::NotFound`], rejected parameters to
    /// [`TransportError::Settings`].
    pub fn open(port_name: &str, settings: LinkSettings) -> Result<Self, TransportError> {
        let port = serialport::new(port_name, settings.baud_rate)
            .data_bits(settings.data_bits.into())
            .parity(settings.parity.into())
            .stop_bits(settings.stop_bits.into())
            .flow_control(settings.flow_control.into())
            .timeout(settings.timeout)
            .open()
            .map_err(|e| match e.kind() {
                serialport::ErrorKind::NoDevice => TransportError::not_found(port_name),
                serialport::ErrorKind::InvalidInput => TransportError::settings(e.to_string()),
                _ => TransportError::Serial(e),
            })?;

        Ok(Self {
            port,
            name: port_name.to_string(),
        })
    }

    /// Open `port_name` with default settings (115200 8N1, 1 s timeout).
    pub fn open_default(port_name: &str) -> Result<Self, TransportError> {
        Self::open(port_name, LinkSettings::default())
    }
}

impl SerialTransport for SerialLink {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        self.port.write(data).map_err(TransportError::Io)
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
        self.port.read(buffer).map_err(TransportError::Io)
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.port.flush().map_err(TransportError::Io)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<(), TransportError> {
        self.port.set_timeout(timeout).map_err(TransportError::Serial)
    }

    fn clear_input(&mut self) -> Result<(), TransportError> {
        self.port
            .clear(serialport::ClearBuffer::Input)
            .map_err(TransportError::Serial)
    }
}

impl std::fmt::Debug for SerialLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLink")
            .field("name", &self.name)
            .field("baud_rate", &self.port.baud_rate())
            .finish()
    }
}
