//! Error types for the WebSocket endpoint core.
//!
//! Handshake operations surface these directly; frame-level errors are
//! mapped by the session onto close codes per RFC 6455.

use thiserror::Error;

/// Result type alias for WebSocket operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during WebSocket operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Opening handshake rejected. No session state is mutated.
    #[error("invalid handshake: {0}")]
    InvalidHandshake(String),

    /// Not enough buffered bytes to finish decoding a frame.
    #[error("incomplete frame: need {needed} more bytes")]
    IncompleteFrame {
        /// Number of additional bytes needed.
        needed: usize,
    },

    /// Opcode value reserved for future use (0x3..=0x7, 0xB..=0xF).
    #[error("reserved opcode: {0:#x}")]
    ReservedOpcode(u8),

    /// Reserved bits set without a negotiated extension.
    #[error("reserved bits set without negotiated extension")]
    ReservedBitsSet,

    /// Unmasked frame received from a client (RFC 6455 Section 5.1).
    #[error("client frame must be masked")]
    UnmaskedClientFrame,

    /// Masked frame received from a server (RFC 6455 Section 5.1).
    #[error("server frame must not be masked")]
    MaskedServerFrame,

    /// Control frame with FIN=0 (RFC 6455 Section 5.5).
    #[error("control frames cannot be fragmented")]
    FragmentedControlFrame,

    /// Control frame payload over 125 bytes (RFC 6455 Section 5.5).
    #[error("control frame payload too large: {0} bytes (max: 125)")]
    ControlFrameTooLarge(usize),

    /// Frame payload exceeds the configured maximum.
    #[error("frame too large: {size} bytes (max: {max})")]
    FrameTooLarge {
        /// Actual payload size.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },

    /// Reassembled message exceeds the configured maximum.
    #[error("message too large: {size} bytes (max: {max})")]
    MessageTooLarge {
        /// Actual message size.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },

    /// Invalid UTF-8 in a text message payload.
    #[error("invalid UTF-8 in text message")]
    InvalidUtf8,

    /// Invalid UTF-8 in a close frame's reason field.
    #[error("invalid UTF-8 in close reason")]
    InvalidCloseReason,

    /// Continuation frame arrived with no fragmented message in progress.
    #[error("unexpected continuation frame")]
    UnexpectedContinuation,

    /// Text or Binary frame arrived while a fragmented message was still
    /// being received.
    #[error("last message incomplete")]
    MessageInProgress,
}
