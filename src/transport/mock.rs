//! In-memory transport for tests and dry runs.
//!
//! `MockTransport` plays the role of the firmware side of the link: it
//! records every frame written to it and serves canned response bytes on
//! subsequent reads. Responses can be scripted per write, or a single
//! auto-reply can answer every write (echo-style devices). A cloneable
//! [`MockObserver`] shares the internal state so assertions remain possible
//! after the transport itself has been moved into a session and dropped.

use super::error::TransportError;
use super::SerialTransport;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct MockState {
    /// Bytes the next reads will return, in order.
    inbox: VecDeque<u8>,
    /// Per-write canned replies; `None` keeps the device silent for that write.
    scripted: VecDeque<Option<Vec<u8>>>,
    /// Reply enqueued after every write when no script entry applies.
    auto_reply: Option<Vec<u8>>,
    /// Every frame written, one entry per `write_bytes` call.
    writes: Vec<Vec<u8>>,
    flushes: u32,
    input_clears: u32,
    /// Fail the next read with a hard (non-timeout) fault.
    fail_next_read: bool,
    timeout: Duration,
    /// How many times the transport has been dropped.
    drops: u32,
}

/// Simulated serial device. Deliberately not `Clone`: exactly one transport
/// instance exists per mock, so drop tracking counts real teardowns.
pub struct MockTransport {
    name: String,
    state: Arc<Mutex<MockState>>,
}

/// Shared-state handle for inspecting a [`MockTransport`] from a test,
/// before or after the transport is dropped.
#[derive(Clone)]
pub struct MockObserver {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(MockState {
                timeout: Duration::from_secs(1),
                ..Default::default()
            })),
        }
    }

    /// A mock that answers every write with the same reply bytes.
    pub fn echoing(name: impl Into<String>, reply: &[u8]) -> Self {
        let mock = Self::new(name);
        mock.state.lock().auto_reply = Some(reply.to_vec());
        mock
    }

    pub fn observer(&self) -> MockObserver {
        MockObserver {
            state: Arc::clone(&self.state),
        }
    }

    /// Queue bytes to be returned by upcoming reads, independent of writes.
    pub fn enqueue(&mut self, data: &[u8]) {
        self.state.lock().inbox.extend(data);
    }

    /// Script the reply to the next unscripted write.
    pub fn push_response(&mut self, reply: &[u8]) {
        self.state.lock().scripted.push_back(Some(reply.to_vec()));
    }

    /// Script the device to stay silent for the next unscripted write.
    pub fn push_silence(&mut self) {
        self.state.lock().scripted.push_back(None);
    }

    /// Make the next read fail with a hard I/O fault instead of a timeout.
    pub fn fail_next_read(&mut self) {
        self.state.lock().fail_next_read = true;
    }
}

impl SerialTransport for MockTransport {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, TransportError> {
        let mut state = self.state.lock();
        state.writes.push(data.to_vec());

        if let Some(reply) = state.scripted.pop_front() {
            if let Some(bytes) = reply {
                state.inbox.extend(bytes);
            }
        } else if let Some(reply) = state.auto_reply.clone() {
            state.inbox.extend(reply);
        }

        Ok(data.len())
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
        let mut state = self.state.lock();

        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(TransportError::Io(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "simulated link fault",
            )));
        }

        if state.inbox.is_empty() {
            // A real port blocks until its deadline, then reports a timeout.
            return Err(TransportError::timeout(state.timeout));
        }

        let mut n = 0;
        for slot in buffer.iter_mut() {
            match state.inbox.pop_front() {
                Some(byte) => {
                    *slot = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        self.state.lock().flushes += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<(), TransportError> {
        self.state.lock().timeout = timeout;
        Ok(())
    }

    fn clear_input(&mut self) -> Result<(), TransportError> {
        let mut state = self.state.lock();
        state.inbox.clear();
        state.input_clears += 1;
        Ok(())
    }
}

impl Drop for MockTransport {
    fn drop(&mut self) {
        self.state.lock().drops += 1;
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MockTransport")
            .field("name", &self.name)
            .field("inbox_len", &state.inbox.len())
            .field("writes", &state.writes.len())
            .finish()
    }
}

impl MockObserver {
    /// All frames written so far, one entry per `write_bytes` call.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state.lock().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.state.lock().writes.len()
    }

    pub fn flush_count(&self) -> u32 {
        self.state.lock().flushes
    }

    pub fn input_clear_count(&self) -> u32 {
        self.state.lock().input_clears
    }

    /// Bytes still queued for reading.
    pub fn inbox_len(&self) -> usize {
        self.state.lock().inbox.len()
    }

    /// How many times the transport has been dropped (0 while it lives).
    pub fn drop_count(&self) -> u32 {
        self.state.lock().drops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_recorded() {
        let mut mock = MockTransport::new("MOCK0");
        let obs = mock.observer();
        mock.write_bytes(b"PING\n").unwrap();
        mock.write_bytes(b"PONG\n").unwrap();

        assert_eq!(obs.writes(), vec![b"PING\n".to_vec(), b"PONG\n".to_vec()]);
    }

    #[test]
    fn enqueued_bytes_are_read_back() {
        let mut mock = MockTransport::new("MOCK0");
        mock.enqueue(b"READY\n");

        let mut buf = [0u8; 16];
        let n = mock.read_bytes(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"READY\n");
    }

    #[test]
    fn empty_inbox_reads_time_out() {
        let mut mock = MockTransport::new("MOCK0");
        mock.set_timeout(Duration::from_millis(250)).unwrap();

        let mut buf = [0u8; 4];
        match mock.read_bytes(&mut buf) {
            Err(TransportError::Timeout(d)) => assert_eq!(d, Duration::from_millis(250)),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[test]
    fn scripted_replies_follow_writes() {
        let mut mock = MockTransport::new("MOCK0");
        mock.push_response(b"1\n");
        mock.push_silence();

        mock.write_bytes(b"A\n").unwrap();
        let mut buf = [0u8; 4];
        let n = mock.read_bytes(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"1\n");

        mock.write_bytes(b"B\n").unwrap();
        assert!(matches!(
            mock.read_bytes(&mut buf),
            Err(TransportError::Timeout(_))
        ));
    }

    #[test]
    fn auto_reply_answers_every_write() {
        let mut mock = MockTransport::echoing("MOCK0", b"OK\n");
        let mut buf = [0u8; 8];

        for _ in 0..3 {
            mock.write_bytes(b"CMD\n").unwrap();
            let n = mock.read_bytes(&mut buf).unwrap();
            assert_eq!(&buf[..n], b"OK\n");
        }
    }

    #[test]
    fn hard_fault_is_not_a_timeout() {
        let mut mock = MockTransport::new("MOCK0");
        mock.fail_next_read();

        let mut buf = [0u8; 4];
        let err = mock.read_bytes(&mut buf).unwrap_err();
        assert!(!err.is_timeout());
    }

    #[test]
    fn observer_survives_drop() {
        let mock = MockTransport::new("MOCK0");
        let obs = mock.observer();
        assert_eq!(obs.drop_count(), 0);
        drop(mock);
        assert_eq!(obs.drop_count(), 1);
    }

    #[test]
    fn clear_input_discards_pending_bytes() {
        let mut mock = MockTransport::new("MOCK0");
        let obs = mock.observer();
        mock.enqueue(b"stale");
        mock.clear_input().unwrap();
        assert_eq!(obs.inbox_len(), 0);
        assert_eq!(obs.input_clear_count(), 1);
    }
}
