//! Policing of incoming frame headers (RFC 6455 Sections 5.1 and 5.2).

use crate::config::Limits;
use crate::error::{Error, Result};
use crate::session::Role;

/// Validates incoming frame headers before the payload is extracted.
///
/// Checks run in order: masking direction, reserved bits, frame size.
#[derive(Debug, Clone)]
pub struct FrameValidator {
    role: Role,
    limits: Limits,
    accept_unmasked_frames: bool,
}

impl FrameValidator {
    /// Create a validator for the given local role.
    #[must_use]
    pub fn new(role: Role, limits: Limits) -> Self {
        Self {
            role,
            limits,
            accept_unmasked_frames: false,
        }
    }

    /// Tolerate unmasked client frames (non-RFC compliant, server only).
    #[must_use]
    pub fn with_accept_unmasked(mut self, accept: bool) -> Self {
        self.accept_unmasked_frames = accept;
        self
    }

    /// Validate the header fields of an incoming frame.
    ///
    /// # Errors
    ///
    /// - `Error::UnmaskedClientFrame` — server received an unmasked frame
    /// - `Error::MaskedServerFrame` — client received a masked frame
    /// - `Error::ReservedBitsSet` — RSV bits without an extension
    /// - `Error::FrameTooLarge` — payload over the configured limit
    pub fn validate_incoming(
        &self,
        masked: bool,
        rsv1: bool,
        rsv2: bool,
        rsv3: bool,
        payload_len: usize,
    ) -> Result<()> {
        match self.role {
            Role::Server => {
                if !masked && !self.accept_unmasked_frames {
                    return Err(Error::UnmaskedClientFrame);
                }
            }
            Role::Client => {
                if masked {
                    return Err(Error::MaskedServerFrame);
                }
            }
        }
        if rsv1 || rsv2 || rsv3 {
            return Err(Error::ReservedBitsSet);
        }
        self.limits.check_frame_size(payload_len)
    }
}
