//! Endpoint role (client or server).

/// Which side of the connection this endpoint took when it was opened.
///
/// The role is fixed at activation and dictates the masking direction
/// per RFC 6455 Section 5.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Outgoing frames are masked; incoming frames must not be.
    Client,
    /// Outgoing frames are not masked; incoming frames must be.
    Server,
}

impl Role {
    /// Whether this role masks its outgoing frames.
    #[inline]
    #[must_use]
    pub const fn must_mask(self) -> bool {
        matches!(self, Role::Client)
    }

    /// Whether this role expects incoming frames to be masked.
    #[inline]
    #[must_use]
    pub const fn expects_masked(self) -> bool {
        matches!(self, Role::Server)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Client => write!(f, "Client"),
            Role::Server => write!(f, "Server"),
        }
    }
}
