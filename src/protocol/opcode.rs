//! WebSocket frame opcodes as defined in RFC 6455.

use crate::error::{Error, Result};

/// WebSocket frame opcode.
///
/// Defines the interpretation of the payload data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// Continuation frame (0x0), carrying a further fragment of the
    /// message opened by a preceding Text or Binary frame.
    Continuation = 0x0,

    /// Text frame (0x1). The complete message payload must be valid UTF-8.
    Text = 0x1,

    /// Binary frame (0x2). Payload is arbitrary bytes.
    Binary = 0x2,

    /// Close frame (0x8). May carry a status code and reason.
    Close = 0x8,

    /// Ping frame (0x9). The receiver replies with a Pong.
    Ping = 0x9,

    /// Pong frame (0xA). Reply to a Ping; may also arrive unsolicited.
    Pong = 0xA,
}

impl OpCode {
    /// Create an `OpCode` from its wire value.
    ///
    /// # Errors
    ///
    /// Returns `Error::ReservedOpcode` for values with no assigned meaning
    /// (0x3..=0x7, 0xB..=0xF and anything above a nibble).
    pub fn from_u8(byte: u8) -> Result<Self> {
        match byte {
            0x0 => Ok(OpCode::Continuation),
            0x1 => Ok(OpCode::Text),
            0x2 => Ok(OpCode::Binary),
            0x8 => Ok(OpCode::Close),
            0x9 => Ok(OpCode::Ping),
            0xA => Ok(OpCode::Pong),
            other => Err(Error::ReservedOpcode(other)),
        }
    }

    /// The wire value of this opcode.
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if this is a control frame opcode (Close, Ping, Pong).
    #[inline]
    #[must_use]
    pub const fn is_control(self) -> bool {
        matches!(self, OpCode::Close | OpCode::Ping | OpCode::Pong)
    }

    /// Check if this is a data frame opcode (Continuation, Text, Binary).
    #[inline]
    #[must_use]
    pub const fn is_data(self) -> bool {
        matches!(self, OpCode::Continuation | OpCode::Text | OpCode::Binary)
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OpCode::Continuation => "Continuation",
            OpCode::Text => "Text",
            OpCode::Binary => "Binary",
            OpCode::Close => "Close",
            OpCode::Ping => "Ping",
            OpCode::Pong => "Pong",
        };
        write!(f, "{name}")
    }
}
