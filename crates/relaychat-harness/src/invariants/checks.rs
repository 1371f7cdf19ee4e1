//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use std::{cmp::Ordering, collections::HashSet};

use super::{AppSnapshot, Invariant, InvariantResult, Violation};

/// Focus must point at an open buffer.
///
/// Focus is `None` exactly when no buffers are open, otherwise it indexes
/// into the presentation order.
pub struct FocusInBounds;

impl Invariant for FocusInBounds {
    fn name(&self) -> &'static str {
        "focus_in_bounds"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let len = state.buffers.len();
        match state.focused {
            None if len == 0 => Ok(()),
            Some(index) if index < len => Ok(()),
            focused => Err(Violation {
                invariant: self.name(),
                message: format!("focus {focused:?} with {len} buffers open"),
            }),
        }
    }
}

/// Buffer names and identifiers must be unique.
pub struct UniqueBuffers;

impl Invariant for UniqueBuffers {
    fn name(&self) -> &'static str {
        "unique_buffers"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();

        for buffer in &state.buffers {
            if !names.insert(buffer.name.as_str()) || !ids.insert(buffer.id) {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("buffer {} ({}) appears twice", buffer.name, buffer.id),
                });
            }
        }
        Ok(())
    }
}

/// Every ranked buffer must be open, listed once, under its current name.
///
/// Closing a buffer evicts its record, so a stale entry means eviction was
/// skipped.
pub struct RankingCoversLiveBuffers;

impl Invariant for RankingCoversLiveBuffers {
    fn name(&self) -> &'static str {
        "ranking_covers_live_buffers"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let mut seen = HashSet::new();

        for (id, display_name) in &state.ranked {
            if !seen.insert(*id) {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("buffer {id} ranked twice"),
                });
            }

            match state.buffer(*id) {
                Some(buffer) if buffer.name == *display_name => {},
                Some(buffer) => {
                    return Err(Violation {
                        invariant: self.name(),
                        message: format!(
                            "buffer {id} ranked as {display_name} but named {}",
                            buffer.name
                        ),
                    });
                },
                None => {
                    return Err(Violation {
                        invariant: self.name(),
                        message: format!("ranked buffer {id} ({display_name}) is not open"),
                    });
                },
            }
        }
        Ok(())
    }
}

/// The ranking must be sorted by last activity, most recent first.
pub struct RankingOrdered;

impl Invariant for RankingOrdered {
    fn name(&self) -> &'static str {
        "ranking_ordered"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        match state.ranked_order.iter().position(|&o| o == Ordering::Less) {
            None => Ok(()),
            Some(i) => Err(Violation {
                invariant: self.name(),
                message: format!(
                    "{} ranked before more recent {}",
                    state.ranked[i].1,
                    state.ranked[i + 1].1
                ),
            }),
        }
    }
}

/// Only message events rank a buffer.
///
/// A ranked buffer must have at least one message line. Join and part
/// notices alone never make a buffer active.
pub struct ActivityFromMessagesOnly;

impl Invariant for ActivityFromMessagesOnly {
    fn name(&self) -> &'static str {
        "activity_from_messages_only"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        for (id, display_name) in &state.ranked {
            if state.buffer(*id).is_some_and(|b| b.message_count == 0) {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("{display_name} ranked without any message"),
                });
            }
        }
        Ok(())
    }
}

/// Transcripts never shrink while their buffer stays open.
pub struct TranscriptAppendOnly;

impl Invariant for TranscriptAppendOnly {
    fn name(&self) -> &'static str {
        "transcript_append_only"
    }

    fn check(&self, state: &AppSnapshot) -> InvariantResult {
        let shrunk = state.transcript_history.iter().find_map(|(id, history)| {
            history.windows(2).find(|w| w[1] < w[0]).map(|w| (*id, w[0], w[1]))
        });

        match shrunk {
            None => Ok(()),
            Some((id, before, after)) => Err(Violation {
                invariant: self.name(),
                message: format!("buffer {id} transcript shrank {before} → {after}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BufferSnapshot;

    fn buffer(id: u64, name: &str, messages: usize) -> BufferSnapshot {
        BufferSnapshot {
            id,
            name: name.into(),
            members: vec![],
            transcript_len: messages,
            message_count: messages,
        }
    }

    #[test]
    fn focus_out_of_bounds_is_violation() {
        let state =
            AppSnapshot { buffers: vec![buffer(1, "#a", 0)], focused: Some(1), ..Default::default() };

        assert!(FocusInBounds.check(&state).is_err());
    }

    #[test]
    fn focus_without_buffers_is_violation() {
        let state = AppSnapshot { focused: Some(0), ..Default::default() };

        assert!(FocusInBounds.check(&state).is_err());
    }

    #[test]
    fn duplicate_names_are_violation() {
        let state = AppSnapshot {
            buffers: vec![buffer(1, "#a", 0), buffer(2, "#a", 0)],
            focused: Some(0),
            ..Default::default()
        };

        assert!(UniqueBuffers.check(&state).is_err());
    }

    #[test]
    fn ranking_of_closed_buffer_is_violation() {
        let state = AppSnapshot {
            buffers: vec![buffer(1, "#a", 1)],
            focused: Some(0),
            ranked: vec![(2, "#b".into())],
            ..Default::default()
        };

        assert!(RankingCoversLiveBuffers.check(&state).is_err());
    }

    #[test]
    fn ranking_out_of_order_is_violation() {
        let state = AppSnapshot {
            buffers: vec![buffer(1, "#a", 1), buffer(2, "#b", 1)],
            focused: Some(0),
            ranked: vec![(1, "#a".into()), (2, "#b".into())],
            ranked_order: vec![Ordering::Less],
            ..Default::default()
        };

        assert!(RankingOrdered.check(&state).is_err());
    }

    #[test]
    fn ties_are_ordered() {
        let state = AppSnapshot {
            ranked: vec![(1, "#a".into()), (2, "#b".into())],
            ranked_order: vec![Ordering::Equal],
            ..Default::default()
        };

        assert!(RankingOrdered.check(&state).is_ok());
    }

    #[test]
    fn ranking_without_messages_is_violation() {
        let state = AppSnapshot {
            buffers: vec![buffer(1, "#a", 0)],
            focused: Some(0),
            ranked: vec![(1, "#a".into())],
            ..Default::default()
        };

        assert!(ActivityFromMessagesOnly.check(&state).is_err());
    }

    #[test]
    fn shrinking_transcript_is_violation() {
        let mut state = AppSnapshot::empty();
        state.transcript_history.insert(1, vec![0, 3, 2]);

        assert!(TranscriptAppendOnly.check(&state).is_err());
    }
}
