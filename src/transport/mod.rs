//! Serial transport abstraction.
//!
//! A narrow trait over byte-oriented serial I/O so the session logic can run
//! against real hardware ([`SerialLink`]) or a simulated device
//! ([`MockTransport`]) without changes.

pub mod error;
pub mod mock;
pub mod serial;
pub mod settings;

pub use error::TransportError;
pub use mock::{MockObserver, MockTransport};
pub use serial::SerialLink;
pub use settings::{DataBits, FlowControl, LinkSettings, Parity, StopBits};

use std::io;
use std::time::Duration;

/// Byte-oriented serial I/O as the command session needs it.
pub trait SerialTransport: Send + std::fmt::Debug {
    /// Write bytes, returning how many were accepted.
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, TransportError>;

    /// Read bytes into `buffer`, returning how many arrived. Blocks up to
    /// the configured timeout; an empty deadline is reported as an error
    /// for which [`TransportError::is_timeout`] holds.
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError>;

    /// Push any buffered output onto the wire.
    fn flush(&mut self) -> Result<(), TransportError>;

    /// The port name or identifier of this transport.
    fn name(&self) -> &str;

    /// Set the per-call read/write timeout.
    fn set_timeout(&mut self, timeout: Duration) -> Result<(), TransportError>;

    /// Discard any unread input.
    fn clear_input(&mut self) -> Result<(), TransportError>;

    /// Write the whole frame, looping over partial writes.
    fn write_all(&mut self, mut data: &[u8]) -> Result<(), TransportError> {
        while !data.is_empty() {
            let n = self.write_bytes(data)?;
            if n == 0 {
                return Err(TransportError::Io(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "transport accepted zero bytes",
                )));
            }
            data = &data[n..];
        }
        Ok(())
    }
}

impl<T: SerialTransport + ?Sized> SerialTransport for Box<T> {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        (**self).write_bytes(data)
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
        (**self).read_bytes(buffer)
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<(), TransportError> {
        (**self).set_timeout(timeout)
    }

    fn clear_input(&mut self) -> Result<(), TransportError> {
        (**self).clear_input()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_all_covers_the_whole_frame() {
        let mut mock = MockTransport::new("MOCK0");
        let obs = mock.observer();
        mock.write_all(b"MODE PA0 OUT\n").unwrap();
        assert_eq!(obs.writes().concat(), b"MODE PA0 OUT\n");
    }

    #[test]
    fn boxed_transport_delegates() {
        let mock = MockTransport::echoing("MOCK0", b"OK\n");
        let obs = mock.observer();
        let mut boxed: Box<dyn SerialTransport> = Box::new(mock);

        boxed.write_all(b"PING\n").unwrap();
        assert_eq!(boxed.name(), "MOCK0");
        assert_eq!(obs.write_count(), 1);
    }
}
