//! Activity ranking.
//!
//! The [`ActivityTracker`] remembers when each buffer last saw a message and
//! produces a recency ranking from it. Buffer counts are small (tens), so the
//! ranking is recomputed on every registration instead of maintaining an
//! ordered index.
//!
//! # Tie-break
//!
//! Timestamps may be coarse, so several buffers can share an instant. The
//! ranking is materialized in the previous ranked order (new buffers last)
//! and stable-sorted, which means equal timestamps never swap places between
//! recomputations.

use std::{
    cmp::Reverse,
    collections::{HashMap, hash_map::Entry},
};

use crate::{ActivityError, BufferId};

/// Last known activity of a buffer.
///
/// Holds the buffer's identity and name by value, so a record outliving its
/// buffer is stale but never dangling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord<I> {
    /// Identifier of the buffer that saw activity.
    pub buffer_id: BufferId,
    /// Display name at the time of the last registration.
    pub display_name: String,
    /// When the last message arrived.
    pub last_activity: I,
}

/// Recency ranking of buffers.
///
/// Generic over the instant type so simulation can drive it with a virtual
/// clock.
#[derive(Debug, Clone)]
pub struct ActivityTracker<I> {
    records: HashMap<BufferId, ActivityRecord<I>>,
    /// Materialized ranking, most recent first. Derived from `records`.
    ranked: Vec<BufferId>,
}

impl<I> Default for ActivityTracker<I> {
    fn default() -> Self {
        Self { records: HashMap::new(), ranked: Vec::new() }
    }
}

impl<I: Copy + Ord> ActivityTracker<I> {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record activity for `buffer_id` at `now` and recompute the ranking.
    ///
    /// Creates the record on first activity, overwrites it afterwards.
    pub fn register_activity(
        &mut self,
        buffer_id: BufferId,
        display_name: impl Into<String>,
        now: I,
    ) {
        let display_name = display_name.into();
        match self.records.entry(buffer_id) {
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();
                record.display_name = display_name;
                record.last_activity = now;
            },
            Entry::Vacant(entry) => {
                entry.insert(ActivityRecord { buffer_id, display_name, last_activity: now });
                self.ranked.push(buffer_id);
            },
        }

        self.rerank();
    }

    /// Drop the record for `buffer_id`.
    ///
    /// Returns `false` if the buffer never saw activity.
    pub fn evict(&mut self, buffer_id: BufferId) -> bool {
        if self.records.remove(&buffer_id).is_none() {
            return false;
        }
        self.rerank();
        true
    }

    /// Records in ranked order, most recent first.
    pub fn ranked(&self) -> impl Iterator<Item = &ActivityRecord<I>> {
        self.ranked.iter().filter_map(|id| self.records.get(id))
    }

    /// Display names in ranked order, most recent first.
    pub fn ranked_names(&self) -> Vec<String> {
        self.ranked().map(|record| record.display_name.clone()).collect()
    }

    /// Display name of the most recently active buffer.
    pub fn most_recently_active(&self) -> Result<&str, ActivityError> {
        self.ranked()
            .next()
            .map(|record| record.display_name.as_str())
            .ok_or(ActivityError::NoActiveBuffer)
    }

    /// Last activity instant for `buffer_id`. `None` if it never saw any.
    pub fn last_activity(&self, buffer_id: BufferId) -> Option<I> {
        self.records.get(&buffer_id).map(|record| record.last_activity)
    }

    /// Number of buffers with recorded activity.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no activity has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn rerank(&mut self) {
        let records = &self.records;
        self.ranked.retain(|id| records.contains_key(id));
        self.ranked.sort_by_key(|id| Reverse(records.get(id).map(|r| r.last_activity)));
    }
}
