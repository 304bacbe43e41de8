//! Shared test doubles for the integration tests.
#![allow(dead_code)] // each test binary uses a different subset

use std::sync::{Arc, Mutex};

use websock::transport::{ConnectionBrokenDelegate, DataReceivedDelegate};
use websock::Transport;

/// In-memory transport capturing everything the session sends and exposing
/// the registered delegates so tests can play the remote peer.
#[derive(Default)]
pub struct MockTransport {
    sent: Mutex<Vec<u8>>,
    data_received: Mutex<Option<DataReceivedDelegate>>,
    connection_broken: Mutex<Option<ConnectionBrokenDelegate>>,
    shutdowns: Mutex<Vec<bool>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Everything the session has written to the wire so far.
    pub fn sent(&self) -> Vec<u8> {
        self.sent.lock().unwrap().clone()
    }

    /// Drop captured wire output, e.g. after a handshake.
    pub fn clear_sent(&self) {
        self.sent.lock().unwrap().clear();
    }

    /// Deliver bytes as if they arrived from the peer.
    pub fn feed(&self, bytes: &[u8]) {
        let mut delegate = self.data_received.lock().unwrap();
        let delegate = delegate
            .as_mut()
            .expect("session has not registered a data-received delegate");
        delegate(bytes);
    }

    /// Report the transport as broken by the peer.
    pub fn break_from_peer(&self, graceful: bool) {
        let mut delegate = self.connection_broken.lock().unwrap();
        let delegate = delegate
            .as_mut()
            .expect("session has not registered a connection-broken delegate");
        delegate(graceful);
    }

    /// The `clean` flags of every `shutdown` call made by the session.
    pub fn shutdowns(&self) -> Vec<bool> {
        self.shutdowns.lock().unwrap().clone()
    }

    pub fn was_shut_down(&self) -> bool {
        !self.shutdowns().is_empty()
    }
}

impl Transport for MockTransport {
    fn peer_id(&self) -> String {
        "mock-peer".into()
    }

    fn send_bytes(&self, bytes: &[u8]) {
        self.sent.lock().unwrap().extend_from_slice(bytes);
    }

    fn set_data_received(&self, delegate: DataReceivedDelegate) {
        *self.data_received.lock().unwrap() = Some(delegate);
    }

    fn set_connection_broken(&self, delegate: ConnectionBrokenDelegate) {
        *self.connection_broken.lock().unwrap() = Some(delegate);
    }

    fn shutdown(&self, clean: bool) {
        self.shutdowns.lock().unwrap().push(clean);
    }
}

/// Collects close-delegate invocations.
#[derive(Default)]
pub struct CloseLog(Mutex<Vec<(u16, String)>>);

impl CloseLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record(&self, code: u16, reason: &str) {
        self.0.lock().unwrap().push((code, reason.to_string()));
    }

    pub fn entries(&self) -> Vec<(u16, String)> {
        self.0.lock().unwrap().clone()
    }
}

/// Collects byte-payload delegate invocations (ping, pong, binary).
#[derive(Default)]
pub struct PayloadLog(Mutex<Vec<Vec<u8>>>);

impl PayloadLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record(&self, payload: &[u8]) {
        self.0.lock().unwrap().push(payload.to_vec());
    }

    pub fn entries(&self) -> Vec<Vec<u8>> {
        self.0.lock().unwrap().clone()
    }
}

/// Collects text delegate invocations.
#[derive(Default)]
pub struct TextLog(Mutex<Vec<String>>);

impl TextLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record(&self, text: &str) {
        self.0.lock().unwrap().push(text.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}
