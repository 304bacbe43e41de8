//! Per-direction fragmentation state.

/// Kind of fragmented message in flight on one direction of the session.
///
/// Tracked independently for sending and receiving, and independently of
/// any individual frame, so control frames can interleave with the
/// fragments of a data message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FragmentKind {
    /// No fragmented message in progress.
    #[default]
    None,
    /// A fragmented text message is in progress.
    Text,
    /// A fragmented binary message is in progress.
    Binary,
}

impl FragmentKind {
    /// Whether no fragmented message is in progress.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, FragmentKind::None)
    }
}
