//! Blocking command session over a serial transport.
//!
//! One session owns one transport for its whole lifetime; dropping the
//! session releases the port on every exit path. The protocol is strictly
//! synchronous: one newline-terminated command out, one newline-terminated
//! response line back, never more than one command in flight.

use crate::command::Command;
use crate::error::AppResult;
use crate::transport::{SerialTransport, TransportError};
use memchr::memchr;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Pause between writing a command and reading its response, giving the
/// device time to process.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(100);

const READ_CHUNK: usize = 256;

/// A synchronous request/response session with a bridge console.
#[derive(Debug)]
pub struct CommandSession<T: SerialTransport> {
    transport: T,
    settle: Duration,
    /// Bytes received past the last response terminator, kept for the next
    /// exchange.
    pending: Vec<u8>,
}

impl<T: SerialTransport> CommandSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            settle: DEFAULT_SETTLE,
            pending: Vec::new(),
        }
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn settle(&self) -> Duration {
        self.settle
    }

    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    /// Discard any stale input left on the link, e.g. a boot banner.
    pub fn drain_input(&mut self) -> AppResult<()> {
        self.pending.clear();
        self.transport.clear_input()?;
        Ok(())
    }

    /// Send a typed command and return the device's response line.
    pub fn send_command(&mut self, command: &Command) -> AppResult<String> {
        self.send_raw(&command.to_string())
    }

    /// Send one raw command line (without terminator) and return the
    /// response, trimmed of surrounding whitespace.
    ///
    /// A device that stays silent past the transport timeout yields an
    /// empty string; that is a valid, vacuous response. Hard transport
    /// faults and non-UTF-8 responses are errors.
    pub fn send_raw(&mut self, line: &str) -> AppResult<String> {
        let mut frame = Vec::with_capacity(line.len() + 1);
        frame.extend_from_slice(line.as_bytes());
        frame.push(b'\n');

        debug!(command = %line, port = %self.transport.name(), "sending");
        self.transport.write_all(&frame)?;
        self.transport.flush()?;

        thread::sleep(self.settle);

        let raw = self.read_line()?;
        let text = std::str::from_utf8(&raw)?.trim().to_string();
        debug!(response = %text, "received");
        Ok(text)
    }

    /// Read up to the next `\n`, or until the transport reports a timeout.
    /// Returns the line without its terminator; on timeout, whatever
    /// accumulated (possibly nothing).
    fn read_line(&mut self) -> Result<Vec<u8>, TransportError> {
        if let Some(line) = self.take_pending_line(0) {
            return Ok(line);
        }

        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.transport.read_bytes(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    let scan_from = self.pending.len();
                    self.pending.extend_from_slice(&chunk[..n]);
                    if let Some(line) = self.take_pending_line(scan_from) {
                        return Ok(line);
                    }
                }
                Err(e) if e.is_timeout() => break,
                Err(e) => return Err(e),
            }
        }

        // No terminator before the deadline; hand back what arrived.
        Ok(std::mem::take(&mut self.pending))
    }

    /// Split one line out of the carry-over buffer if it holds a `\n` at or
    /// after `scan_from`.
    fn take_pending_line(&mut self, scan_from: usize) -> Option<Vec<u8>> {
        let offset = memchr(b'\n', &self.pending[scan_from..])?;
        let end = scan_from + offset;
        let mut line: Vec<u8> = self.pending.drain(..=end).collect();
        line.pop();
        Some(line)
    }
}
