//! Application state machine.
//!
//! This module defines the [`App`] state machine, which owns every piece of
//! mutable client state (buffers, activity ranking, focus, input lines) and is
//! completely decoupled from I/O.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//! Only the UI task calls into it; other tasks reach it through the update
//! queue.
//!
//! # Responsibilities
//!
//! - Routes inbound transport events to buffers (see `router`).
//! - Moves focus through the presentation order (see `navigation`).
//! - Edits the focused buffer's input line and turns submits into sends.

mod navigation;
mod router;

use std::collections::HashMap;

use relaychat_core::{
    ActivityError, ActivityTracker, Buffer, BufferId, BufferRegistry, Environment, FocusState,
    RegistryError,
};

use crate::{AppAction, AppEvent, InputCommand, InputLine, KeyInput, OutboundMessage, RenderRequest};

/// Ticks a status message stays visible.
const STATUS_TTL_TICKS: u32 = 20;

/// Status bar message with its remaining lifetime.
#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    ticks_left: u32,
}

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App<E: Environment> {
    /// Clock used to timestamp activity.
    env: E,
    /// Open buffers.
    registry: BufferRegistry,
    /// Recency ranking, driven by message events only.
    activity: ActivityTracker<E::Instant>,
    /// Focused presentation index.
    focus: FocusState,
    /// One input line per open buffer.
    inputs: HashMap<BufferId, InputLine>,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. Cleared after [`STATUS_TTL_TICKS`] ticks or
    /// by the next successful submit.
    status: Option<StatusMessage>,
    /// Inbound events dropped because their buffer was not found.
    dropped_events: u64,
}

impl<E: Environment> App<E> {
    /// Create an App with no open buffers.
    pub fn new(env: E) -> Self {
        Self {
            env,
            registry: BufferRegistry::new(),
            activity: ActivityTracker::new(),
            focus: FocusState::new(),
            inputs: HashMap::new(),
            terminal_size: (80, 24),
            status: None,
            dropped_events: 0,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => self.expire_status(),
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render(RenderRequest::Full)]
            },
            AppEvent::Inbound(event) => self.dispatch(event),
            AppEvent::Error { message } => {
                self.set_status(format!("Error: {message}"));
                vec![AppAction::Render(RenderRequest::Full)]
            },
        }
    }

    /// Address a send to an open buffer.
    ///
    /// Does not touch the local transcript: the transport echoes the message
    /// back as an inbound message event.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFoundId`] if `buffer_id` is not open.
    pub fn send_message(
        &self,
        buffer_id: BufferId,
        text: impl Into<String>,
    ) -> Result<Vec<AppAction>, RegistryError> {
        let channel = self.registry.lookup_id(buffer_id)?.name().to_string();
        Ok(vec![AppAction::Send(OutboundMessage { buffer_id, channel, text: text.into() })])
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key.command() {
            Some(InputCommand::NavigateNext) => self.focus_next(),
            Some(InputCommand::NavigatePrevious) => self.focus_previous(),
            Some(InputCommand::Submit) => self.submit(),
            Some(InputCommand::Quit) => self.quit(),
            None => self.edit_input(key),
        }
    }

    /// Apply an editing key to the focused buffer's input line.
    fn edit_input(&mut self, key: KeyInput) -> Vec<AppAction> {
        let Some(buffer_id) = self.focused_id() else {
            return vec![];
        };

        match self.inputs.get_mut(&buffer_id).map(|input| input.edit(key)) {
            Some(true) => vec![AppAction::Render(RenderRequest::Full)],
            _ => vec![],
        }
    }

    /// Send the focused buffer's input line to that buffer and clear it.
    fn submit(&mut self) -> Vec<AppAction> {
        let Some(buffer_id) = self.focused_id() else {
            self.set_status("No buffer to send to");
            return vec![AppAction::Render(RenderRequest::Full)];
        };

        let Some(text) =
            self.inputs.get(&buffer_id).map(InputLine::text).filter(|text| !text.is_empty())
        else {
            return vec![];
        };

        let mut actions = match self.send_message(buffer_id, text) {
            Ok(actions) => actions,
            Err(e) => {
                self.set_status(e.to_string());
                return vec![AppAction::Render(RenderRequest::Full)];
            },
        };

        if let Some(input) = self.inputs.get_mut(&buffer_id) {
            input.clear();
        }
        self.status = None;
        actions.push(AppAction::Render(RenderRequest::Full));
        actions
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage { text: text.into(), ticks_left: STATUS_TTL_TICKS });
    }

    /// Count down the status message, clearing it when its time is up.
    fn expire_status(&mut self) -> Vec<AppAction> {
        let Some(status) = &mut self.status else {
            return vec![];
        };

        status.ticks_left = status.ticks_left.saturating_sub(1);
        if status.ticks_left > 0 {
            return vec![];
        }

        self.status = None;
        vec![AppAction::Render(RenderRequest::Full)]
    }

    fn focused_id(&self) -> Option<BufferId> {
        self.focused_buffer().map(Buffer::id)
    }

    /// All open buffers.
    pub fn registry(&self) -> &BufferRegistry {
        &self.registry
    }

    /// Activity ranking.
    pub fn activity(&self) -> &ActivityTracker<E::Instant> {
        &self.activity
    }

    /// Display names by recency, most recently active first.
    pub fn ranked_buffers(&self) -> Vec<String> {
        self.activity.ranked_names()
    }

    /// Display name of the most recently active buffer.
    pub fn most_recently_active(&self) -> Result<&str, ActivityError> {
        self.activity.most_recently_active()
    }

    /// Focused presentation index. `None` if no buffers are open.
    pub fn focused_index(&self) -> Option<usize> {
        self.focus.index()
    }

    /// Focused buffer. `None` if no buffers are open.
    pub fn focused_buffer(&self) -> Option<&Buffer> {
        self.focus.index().and_then(|index| self.registry.get(index))
    }

    /// Input line of the focused buffer. `None` if no buffers are open.
    pub fn input(&self) -> Option<&InputLine> {
        self.focused_id().and_then(|id| self.inputs.get(&id))
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Number of inbound events dropped for unknown buffers.
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }
}
