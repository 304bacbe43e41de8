//! Close status codes (RFC 6455 Section 7.4).

/// Normal closure; the purpose for which the connection was established
/// has been fulfilled.
pub const NORMAL: u16 = 1000;

/// Endpoint is going away (server shutdown, page navigating away).
pub const GOING_AWAY: u16 = 1001;

/// A protocol error was detected.
pub const PROTOCOL_ERROR: u16 = 1002;

/// Received a data type the endpoint cannot accept.
pub const UNSUPPORTED_DATA: u16 = 1003;

/// Reserved: no status code was present in the close frame. Must never be
/// sent on the wire; a close frame carrying this code has an empty payload.
pub const NO_STATUS: u16 = 1005;

/// Reserved: the connection was lost without a closing handshake. Must
/// never be sent on the wire.
pub const ABNORMAL: u16 = 1006;

/// Received payload inconsistent with the message type (bad UTF-8 in a
/// text message or close reason).
pub const INVALID_PAYLOAD: u16 = 1007;

/// Received a message too large to process.
pub const MESSAGE_TOO_BIG: u16 = 1009;

/// Check whether a code is reserved and must not appear in a close frame
/// on the wire (RFC 6455 Section 7.4.1).
#[must_use]
pub const fn is_reserved(code: u16) -> bool {
    matches!(code, 1004..=1006 | 1015)
}
