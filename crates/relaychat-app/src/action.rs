//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.
//! Every registry or ranking operation with a visible effect produces exactly
//! one [`RenderRequest`]. Batching them is up to the render surface.

use relaychat_core::BufferId;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Refresh part of the render surface.
    Render(RenderRequest),

    /// Hand a message to the transport.
    Send(OutboundMessage),

    /// Quit the application.
    Quit,
}

/// Narrow interface to the render surface, keyed by buffer name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderRequest {
    /// Redraw everything (resize, input edits, status changes).
    Full,

    /// Activity ranking changed.
    ActivityIndicator {
        /// Display names, most recently active first.
        ranked: Vec<String>,
    },

    /// A line was appended to a transcript.
    TranscriptAppend {
        /// Buffer name.
        buffer: String,
        /// Rendered line.
        line: String,
    },

    /// A member was added to a buffer.
    MemberAdded {
        /// Buffer name.
        buffer: String,
        /// Added nick.
        nick: String,
    },

    /// A member was removed from a buffer.
    MemberRemoved {
        /// Buffer name.
        buffer: String,
        /// Removed nick.
        nick: String,
    },

    /// A buffer was opened.
    BufferOpened {
        /// Buffer name.
        buffer: String,
    },

    /// A buffer was closed.
    BufferClosed {
        /// Buffer name.
        buffer: String,
    },

    /// Show this buffer and move input focus to its input area.
    SwitchFocus {
        /// Buffer name.
        buffer: String,
    },
}

/// Message handed to the transport, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Identifier of the target buffer.
    pub buffer_id: BufferId,
    /// Channel name of the target buffer.
    pub channel: String,
    /// Message body.
    pub text: String,
}
