//! Error types for the relaychat core.
//!
//! All errors here are local and recoverable. Callers decide whether a
//! failure is worth surfacing to the user; the router treats `NotFound` as a
//! dropped event rather than a failure.

use thiserror::Error;

use crate::BufferId;

/// Errors raised by [`crate::BufferRegistry`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A buffer with this name is already open
    #[error("buffer {name:?} already exists")]
    DuplicateBuffer {
        /// Name that collided
        name: String,
    },

    /// A buffer with this identifier is already open
    #[error("buffer id {id} already in use")]
    DuplicateBufferId {
        /// Identifier that collided
        id: BufferId,
    },

    /// No open buffer has this name
    #[error("no buffer named {name:?}")]
    NotFound {
        /// Name that was looked up
        name: String,
    },

    /// No open buffer has this identifier
    #[error("no buffer with id {id}")]
    NotFoundId {
        /// Identifier that was looked up
        id: BufferId,
    },
}

impl RegistryError {
    /// Returns true if the error is a failed lookup.
    ///
    /// Lookup failures are expected when events race with buffer removal and
    /// are dropped by the router instead of being reported as failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NotFoundId { .. })
    }
}

/// Errors raised by [`crate::ActivityTracker`] queries.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityError {
    /// No activity has been registered yet
    #[error("no buffer has recorded activity")]
    NoActiveBuffer,
}
