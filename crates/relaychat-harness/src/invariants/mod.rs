//! Client state checks run after every simulated step.
//!
//! A step captures an [`AppSnapshot`] (chained with
//! [`AppSnapshot::following`] so transcript growth can be compared) and hands
//! it to an [`InvariantRegistry`].

mod checks;
mod snapshot;

pub use checks::{
    ActivityFromMessagesOnly, FocusInBounds, RankingCoversLiveBuffers, RankingOrdered,
    TranscriptAppendOnly, UniqueBuffers,
};
pub use snapshot::{AppSnapshot, BufferSnapshot};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// A property of an [`AppSnapshot`].
pub trait Invariant: Send + Sync {
    /// Invariant name for error reporting.
    fn name(&self) -> &'static str;

    /// Check one snapshot.
    fn check(&self, state: &AppSnapshot) -> InvariantResult;
}

/// Set of invariants checked together.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the standard invariants.
    ///
    /// Includes:
    /// - [`FocusInBounds`]: focus indexes an open buffer
    /// - [`UniqueBuffers`]: no two buffers share a name or id
    /// - [`RankingCoversLiveBuffers`]: ranking only lists open buffers
    /// - [`RankingOrdered`]: ranking is most recent first
    /// - [`ActivityFromMessagesOnly`]: only messages rank a buffer
    /// - [`TranscriptAppendOnly`]: transcripts never shrink
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(FocusInBounds);
        registry.add(UniqueBuffers);
        registry.add(RankingCoversLiveBuffers);
        registry.add(RankingOrdered);
        registry.add(ActivityFromMessagesOnly);
        registry.add(TranscriptAppendOnly);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check every invariant, collecting all violations.
    pub fn check_all(&self, state: &AppSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Panic listing every violation, prefixed with `context`.
    #[allow(clippy::panic, reason = "test harness failure path")]
    pub fn assert_all(&self, state: &AppSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Whether no invariants are registered.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_invariants() {
        let registry = InvariantRegistry::standard();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn empty_snapshot_passes_invariants() {
        let registry = InvariantRegistry::standard();
        let snapshot = AppSnapshot::empty();
        assert!(registry.check_all(&snapshot).is_ok());
    }

    #[test]
    fn focus_without_buffers_is_reported_by_name() {
        let registry = InvariantRegistry::standard();
        let snapshot = AppSnapshot { focused: Some(0), ..AppSnapshot::empty() };

        let names: Vec<_> = registry
            .check_all(&snapshot)
            .err()
            .unwrap_or_default()
            .iter()
            .map(|v| v.invariant)
            .collect();
        assert_eq!(names, vec!["focus_in_bounds"]);
    }
}
