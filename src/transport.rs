//! Byte-level transport abstraction consumed by the session.
//!
//! The session is transport-agnostic: anything full-duplex that can push
//! received chunks through a callback and accept outgoing bytes can carry
//! a WebSocket. The embedding server or client owns the actual socket,
//! its buffering, and any asynchronous I/O behind this interface.

/// Invoked with each chunk of bytes arriving from the peer.
pub type DataReceivedDelegate = Box<dyn FnMut(&[u8]) + Send>;

/// Invoked exactly once if the transport is lost abruptly. The flag
/// reports whether the loss was graceful at the transport level.
pub type ConnectionBrokenDelegate = Box<dyn FnMut(bool) + Send>;

/// A full-duplex byte connection.
///
/// Delegates must be invoked serially, never concurrently for the same
/// transport. [`Transport::send_bytes`] is a synchronous best-effort
/// hand-off; delivery failures surface later through the broken delegate.
pub trait Transport: Send + Sync {
    /// Identifier of the remote peer, used in diagnostics.
    fn peer_id(&self) -> String;

    /// Queue bytes for transmission to the peer.
    fn send_bytes(&self, bytes: &[u8]);

    /// Register the delegate to invoke with received data. Replaces any
    /// previously registered delegate.
    fn set_data_received(&self, delegate: DataReceivedDelegate);

    /// Register the delegate to invoke on abrupt connection loss.
    /// Replaces any previously registered delegate.
    fn set_connection_broken(&self, delegate: ConnectionBrokenDelegate);

    /// Terminate the transport. With `clean` set, pending output is
    /// drained before the connection is torn down; otherwise it is
    /// dropped immediately.
    fn shutdown(&self, clean: bool);
}
