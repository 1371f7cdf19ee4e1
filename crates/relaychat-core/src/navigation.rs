//! Positional focus over the presentation order.
//!
//! Navigation is modulo arithmetic over the number of open buffers. It is
//! positional only: activity ranking never influences which buffer comes
//! next.

/// Index of the focused buffer in presentation order.
///
/// `None` only while no buffers are open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusState {
    index: Option<usize>,
}

impl FocusState {
    /// Focus on nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Focused presentation index.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Focus on `index` directly (used when a buffer is opened).
    pub fn focus(&mut self, index: usize) {
        self.index = Some(index);
    }

    /// Advance focus, wrapping at `len`.
    ///
    /// Returns the newly focused index, or `None` when `len` is zero.
    pub fn next(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }

        let next = self.index.map_or(0, |index| (index + 1) % len);
        self.index = Some(next);
        Some(next)
    }

    /// Retreat focus, wrapping at `len`.
    ///
    /// Returns the newly focused index, or `None` when `len` is zero.
    pub fn previous(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }

        let previous = self.index.map_or(len - 1, |index| (index.min(len - 1) + len - 1) % len);
        self.index = Some(previous);
        Some(previous)
    }

    /// Re-clamp after the buffer at `removed` was closed, leaving `len`
    /// buffers open.
    ///
    /// Buffers after the removed one shift left by one, so focus follows the
    /// same buffer. Losing the focused buffer moves focus to whichever buffer
    /// now occupies its slot.
    pub fn removed(&mut self, removed: usize, len: usize) {
        self.index = match self.index {
            _ if len == 0 => None,
            Some(index) if removed < index => Some(index - 1),
            Some(index) => Some(index.min(len - 1)),
            None => None,
        };
    }
}
