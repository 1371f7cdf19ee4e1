//! Deterministic simulation harness for relaychat.
//!
//! Virtual-clock [`Environment`](relaychat_core::Environment) and scripted
//! [`Driver`](relaychat_app::Driver) implementations, so the same
//! [`Runtime`](relaychat_app::Runtime) that drives the terminal can be run
//! reproducibly in tests.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the common
//! registry/ranking/focus invariants.
//!
//! # Operations
//!
//! [`Operation`] is an `Arbitrary` script step, so property tests and the
//! fuzzer can generate the same event sequences.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod operation;
pub mod sim_driver;
pub mod sim_env;

pub use invariants::{
    ActivityFromMessagesOnly, AppSnapshot, BufferSnapshot, FocusInBounds, Invariant,
    InvariantRegistry, InvariantResult, RankingCoversLiveBuffers, RankingOrdered,
    TranscriptAppendOnly, UniqueBuffers, Violation,
};
pub use operation::{Operation, SmallChannel, SmallNick};
pub use sim_driver::{SimDriver, SimDriverError};
pub use sim_env::SimEnv;
