//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (keyboard, resize) and periodic ticks.
//! - Transport notifications, wrapped as [`InboundEvent`].

use relaychat_core::BufferId;

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Event produced by the transport.
    Inbound(InboundEvent),

    /// Transport or driver failure worth showing to the user.
    Error {
        /// Error description.
        message: String,
    },
}

impl From<InboundEvent> for AppEvent {
    fn from(event: InboundEvent) -> Self {
        Self::Inbound(event)
    }
}

/// Classified events from the transport, addressed by channel name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Chat message in a channel.
    Message {
        /// Channel name.
        channel: String,
        /// Sender nick.
        from: String,
        /// Message body.
        text: String,
    },

    /// A user joined a channel.
    Join {
        /// Channel name.
        channel: String,
        /// Nick that joined.
        nick: String,
        /// Hostmask reported by the server.
        hostmask: String,
    },

    /// A user left a channel.
    Part {
        /// Channel name.
        channel: String,
        /// Nick that left.
        nick: String,
        /// Hostmask reported by the server.
        hostmask: String,
    },

    /// User-list addition without a transcript notice.
    MemberAdded {
        /// Channel name.
        channel: String,
        /// Nick to add.
        nick: String,
    },

    /// User-list removal without a transcript notice.
    MemberRemoved {
        /// Channel name.
        channel: String,
        /// Nick to remove.
        nick: String,
    },

    /// Initial member list of a newly opened channel.
    MemberListSnapshot {
        /// Channel name.
        channel: String,
        /// Identifier the transport uses for this channel.
        buffer_id: BufferId,
        /// Nicks present when the channel was opened.
        members: Vec<String>,
    },

    /// The channel was closed.
    BufferClosed {
        /// Channel name.
        channel: String,
    },
}

impl InboundEvent {
    /// Channel this event is addressed to.
    pub fn channel(&self) -> &str {
        match self {
            Self::Message { channel, .. }
            | Self::Join { channel, .. }
            | Self::Part { channel, .. }
            | Self::MemberAdded { channel, .. }
            | Self::MemberRemoved { channel, .. }
            | Self::MemberListSnapshot { channel, .. }
            | Self::BufferClosed { channel } => channel,
        }
    }
}
