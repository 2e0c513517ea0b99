//! Shared test utilities for pinprobe integration tests.

#![allow(dead_code)]

use pinprobe::session::CommandSession;
use pinprobe::transport::{MockObserver, MockTransport};
use std::time::Duration;

/// A session over a mock that answers every write with `reply`, plus the
/// observer for asserting on traffic and teardown. Settle delay is zero to
/// keep tests fast.
pub fn echo_session(reply: &[u8]) -> (CommandSession<MockTransport>, MockObserver) {
    let mock = MockTransport::echoing("MOCK0", reply);
    let observer = mock.observer();
    let session = CommandSession::new(mock).with_settle(Duration::ZERO);
    (session, observer)
}

/// A session over a mock with one scripted reply per upcoming write;
/// `None` entries keep the device silent for that write.
pub fn scripted_session(
    replies: Vec<Option<&[u8]>>,
) -> (CommandSession<MockTransport>, MockObserver) {
    let mut mock = MockTransport::new("MOCK0");
    for reply in replies {
        match reply {
            Some(bytes) => mock.push_response(bytes),
            None => mock.push_silence(),
        }
    }
    let observer = mock.observer();
    let session = CommandSession::new(mock).with_settle(Duration::ZERO);
    (session, observer)
}
