//! Core data structures for the relaychat client.
//!
//! Everything in this crate is synchronous and free of I/O. Time enters only
//! through the [`env::Environment`] abstraction so the same code runs against
//! a real clock in the terminal client and a virtual clock in simulation.
//!
//! # Components
//!
//! - [`BufferRegistry`]: owns open buffers, their members and transcripts
//! - [`ActivityTracker`]: recency ranking of buffers by message activity
//! - [`FocusState`]: cyclic, positional focus over the presentation order

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod activity;
pub mod buffer;
pub mod env;
pub mod error;
pub mod navigation;
pub mod registry;

pub use activity::{ActivityRecord, ActivityTracker};
pub use buffer::{Buffer, BufferId, TranscriptLine};
pub use env::Environment;
pub use error::{ActivityError, RegistryError};
pub use navigation::FocusState;
pub use registry::BufferRegistry;
