//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Inbound transport events arrive
//! on the update queue and are multiplexed with keyboard input, so the UI
//! task sees a single serialized event stream.

use std::{
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use relaychat_app::{
    App, AppEvent, Driver, KeyInput, OutboundMessage, QueueError, RenderRequest, UpdateReceiver,
};
use relaychat_core::Environment;
use thiserror::Error;
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    time::{Interval, MissedTickBehavior},
};

use crate::ui;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The update queue feeding transport events closed.
    #[error("update queue error: {0}")]
    Queue(#[from] QueueError),

    /// The transport stopped accepting outbound messages.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), and the two ends of
/// the transport: the update queue it drains and the outbound channel it
/// feeds.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    updates: UpdateReceiver,
    outbound: mpsc::Sender<OutboundMessage>,
    tick: Interval,
    restored: bool,
}

impl TerminalDriver {
    /// Enter raw mode and the alternate screen.
    pub fn new(
        updates: UpdateReceiver,
        outbound: mpsc::Sender<OutboundMessage>,
        tick_rate: Duration,
    ) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let mut tick = tokio::time::interval(tick_rate);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Ok(Self {
            terminal,
            event_stream: EventStream::new(),
            updates,
            outbound,
            tick,
            restored: false,
        })
    }

    /// Convert a crossterm key event to `KeyInput`.
    ///
    /// Ctrl+C is treated as Esc so raw mode never traps the user.
    fn convert_key(key: KeyEvent) -> Option<KeyInput> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(KeyInput::Esc)
            },
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Delete => Some(KeyInput::Delete),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::BackTab => Some(KeyInput::BackTab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            KeyCode::Home => Some(KeyInput::Home),
            KeyCode::End => Some(KeyInput::End),
            _ => None,
        }
    }

    fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        loop {
            tokio::select! {
                biased;

                // Terminal events
                maybe_event = self.event_stream.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            if let Some(input) = Self::convert_key(key) {
                                return Ok(Some(AppEvent::Key(input)));
                            }
                        },
                        Some(Ok(Event::Resize(cols, rows))) => {
                            return Ok(Some(AppEvent::Resize(cols, rows)));
                        },
                        Some(Ok(_)) => {},
                        Some(Err(e)) => return Err(TerminalError::Io(e)),
                        None => return Ok(None),
                    }
                }

                // Transport events
                update = self.updates.recv() => {
                    return update.map(Some).ok_or(TerminalError::Queue(QueueError::Closed));
                }

                _ = self.tick.tick() => {
                    return Ok(Some(AppEvent::Tick));
                }
            }
        }
    }

    async fn send_message(&mut self, message: OutboundMessage) -> Result<(), Self::Error> {
        forward_outbound(&self.outbound, message)
    }

    fn render<E: Environment>(
        &mut self,
        app: &App<E>,
        request: &RenderRequest,
    ) -> Result<(), Self::Error> {
        tracing::trace!(?request, "render");
        self.terminal.draw(|frame| ui::render(frame, app))?;
        Ok(())
    }

    fn stop(&mut self) {
        self.restore();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Hand a message to the transport without waiting for room.
///
/// The UI task is the only consumer of the update queue the transport writes
/// into, so it must never wait on the transport.
fn forward_outbound(
    outbound: &mpsc::Sender<OutboundMessage>,
    message: OutboundMessage,
) -> Result<(), TerminalError> {
    outbound.try_send(message).map_err(|e| match e {
        TrySendError::Full(message) => {
            tracing::warn!(channel = %message.channel, "outbound queue full, message dropped");
            let reason = format!("transport busy, message to {} not sent", message.channel);
            TerminalError::Transport(reason)
        },
        TrySendError::Closed(_) => TerminalError::Transport("outbound channel closed".into()),
    })
}
