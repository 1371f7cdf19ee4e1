//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of an [`App`] at a point in time.
//! Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks. History-based invariants read the per-buffer
//! history that [`AppSnapshot::following`] carries forward.

use std::{cmp::Ordering, collections::HashMap};

use relaychat_app::App;
use relaychat_core::{BufferId, Environment};

/// Snapshot of one open buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferSnapshot {
    /// Buffer identifier.
    pub id: BufferId,
    /// Channel name.
    pub name: String,
    /// Members in sorted order.
    pub members: Vec<String>,
    /// Transcript length.
    pub transcript_len: usize,
    /// Number of message lines in the transcript.
    pub message_count: usize,
}

/// Snapshot of the whole client.
#[derive(Debug, Clone, Default)]
pub struct AppSnapshot {
    /// Open buffers in presentation order.
    pub buffers: Vec<BufferSnapshot>,
    /// Focused presentation index.
    pub focused: Option<usize>,
    /// Activity ranking as `(id, display name)`, most recent first.
    pub ranked: Vec<(BufferId, String)>,
    /// Comparison of each ranked instant with the one after it.
    pub ranked_order: Vec<Ordering>,
    /// Transcript lengths observed so far, per buffer.
    pub transcript_history: HashMap<BufferId, Vec<usize>>,
}

impl AppSnapshot {
    /// Create an empty snapshot (no buffers).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Capture the observable state of `app`.
    pub fn capture<E: Environment>(app: &App<E>) -> Self {
        let buffers: Vec<_> = app
            .registry()
            .iter()
            .map(|buffer| BufferSnapshot {
                id: buffer.id(),
                name: buffer.name().to_string(),
                members: buffer.members().map(str::to_string).collect(),
                transcript_len: buffer.transcript().len(),
                message_count: buffer.transcript().iter().filter(|l| l.is_message()).count(),
            })
            .collect();

        let records: Vec<_> = app.activity().ranked().collect();
        let ranked = records.iter().map(|r| (r.buffer_id, r.display_name.clone())).collect();
        let ranked_order =
            records.windows(2).map(|w| w[0].last_activity.cmp(&w[1].last_activity)).collect();

        let transcript_history =
            buffers.iter().map(|b| (b.id, vec![b.transcript_len])).collect();

        Self { buffers, focused: app.focused_index(), ranked, ranked_order, transcript_history }
    }

    /// Capture `app`, extending the transcript history of `previous`.
    ///
    /// History of a buffer that is no longer open is dropped, so a reopened
    /// buffer starts a fresh history.
    pub fn following<E: Environment>(app: &App<E>, previous: &Self) -> Self {
        let mut snapshot = Self::capture(app);
        for (id, history) in &mut snapshot.transcript_history {
            if let Some(before) = previous.transcript_history.get(id) {
                let mut joined = before.clone();
                joined.append(history);
                *history = joined;
            }
        }
        snapshot
    }

    /// Buffer with the given identifier.
    pub fn buffer(&self, id: BufferId) -> Option<&BufferSnapshot> {
        self.buffers.iter().find(|b| b.id == id)
    }

    /// Buffer with the given name.
    pub fn buffer_named(&self, name: &str) -> Option<&BufferSnapshot> {
        self.buffers.iter().find(|b| b.name == name)
    }
}

#[cfg(test)]
mod tests {
    use relaychat_app::{AppEvent, InboundEvent};

    use super::*;
    use crate::SimEnv;

    fn open(app: &mut App<SimEnv>, channel: &str, id: BufferId) {
        let _ = app.handle(AppEvent::Inbound(InboundEvent::MemberListSnapshot {
            channel: channel.into(),
            buffer_id: id,
            members: vec!["zed".into(), "ada".into()],
        }));
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = AppSnapshot::empty();
        assert!(snapshot.buffers.is_empty());
        assert_eq!(snapshot.focused, None);
    }

    #[test]
    fn capture_reflects_app() {
        let mut app = App::new(SimEnv::new());
        open(&mut app, "#a", 7);

        let snapshot = AppSnapshot::capture(&app);

        assert_eq!(snapshot.focused, Some(0));
        assert_eq!(snapshot.buffer_named("#a").map(|b| b.id), Some(7));
        assert_eq!(snapshot.buffer(7).map(|b| b.members.clone()), Some(vec![
            "ada".to_string(),
            "zed".to_string()
        ]));
    }

    #[test]
    fn following_extends_history() {
        let mut app = App::new(SimEnv::new());
        open(&mut app, "#a", 1);
        let first = AppSnapshot::capture(&app);

        let _ = app.handle(AppEvent::Inbound(InboundEvent::Message {
            channel: "#a".into(),
            from: "ada".into(),
            text: "hi".into(),
        }));
        let second = AppSnapshot::following(&app, &first);

        assert_eq!(second.transcript_history.get(&1), Some(&vec![0, 1]));
    }
}
