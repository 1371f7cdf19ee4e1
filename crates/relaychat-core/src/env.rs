//! Environment abstraction for deterministic testing.
//!
//! Decouples buffer bookkeeping from the system clock. The terminal client
//! uses a monotonic system clock, simulation uses a virtual clock that only
//! moves when the test advances it.

/// Abstract environment providing time.
///
/// # Invariants
///
/// - `now()` never goes backwards within a single execution context.
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    ///
    /// Production environments use `std::time::Instant`, simulation uses a
    /// virtual tick counter.
    type Instant: Copy + Ord + Send + Sync + std::fmt::Debug;

    /// Current time (monotonic).
    fn now(&self) -> Self::Instant;
}
