//! Virtual-clock environment.
//!
//! `SimEnv` replaces wall-clock time with a shared tick counter, so activity
//! ranking is reproducible and ties can be produced on purpose.
//!
//! # Modes
//!
//! - **Manual** ([`SimEnv::new`]): time only moves on [`SimEnv::advance`].
//!   Every reading between two advances is the same instant.
//! - **Auto-advancing** ([`SimEnv::auto_advancing`]): every reading returns a
//!   fresh, strictly larger instant.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use relaychat_core::Environment;

/// Deterministic environment with a virtual clock.
///
/// Clones share the same clock.
#[derive(Debug, Clone, Default)]
pub struct SimEnv {
    ticks: Arc<AtomicU64>,
    auto_advance: bool,
}

impl SimEnv {
    /// Create an environment whose clock only moves on [`SimEnv::advance`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment whose clock ticks once per reading.
    pub fn auto_advancing() -> Self {
        Self { ticks: Arc::default(), auto_advance: true }
    }

    /// Move the clock forward by `ticks`.
    pub fn advance(&self, ticks: u64) {
        self.ticks.fetch_add(ticks, Ordering::SeqCst);
    }

    /// Current reading without advancing.
    pub fn peek(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }
}

impl Environment for SimEnv {
    type Instant = u64;

    fn now(&self) -> u64 {
        if self.auto_advance {
            self.ticks.fetch_add(1, Ordering::SeqCst) + 1
        } else {
            self.ticks.load(Ordering::SeqCst)
        }
    }
}
