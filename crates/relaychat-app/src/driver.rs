//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide the render
//! surface and transport, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::future::Future;

use relaychat_core::Environment;

use crate::{App, AppEvent, OutboundMessage, RenderRequest};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal and in simulation.
///
/// # Implementations
///
/// - **TUI**: crossterm for keyboard events, ratatui for rendering, the
///   update queue for transport events
/// - **Simulation**: scripted events and a recorded render log
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next event.
    ///
    /// Keyboard input, resizes, ticks and inbound transport events all arrive
    /// here, already serialized. Returns `None` when the event sources are
    /// exhausted and the runtime should stop.
    fn poll_event(
        &mut self,
    ) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Hand an outbound message to the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport is gone.
    fn send_message(
        &mut self,
        message: OutboundMessage,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Apply a render request.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render<E: Environment>(
        &mut self,
        app: &App<E>,
        request: &RenderRequest,
    ) -> Result<(), Self::Error>;

    /// Release the render surface and transport.
    fn stop(&mut self);
}
