//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`relaychat_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! The driver replays injected events, records every render request and
//! outbound message, and can loop sends back as inbound messages the way a
//! real transport echoes them.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use relaychat_app::{App, AppEvent, Driver, InboundEvent, OutboundMessage, RenderRequest};
use relaychat_core::Environment;

use crate::invariants::{AppSnapshot, InvariantRegistry};

/// Error type for simulation driver.
#[derive(Debug, Clone)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// Shared state for event injection.
///
/// This allows injection and inspection from outside async contexts, and
/// after the runtime has taken ownership of the driver.
#[derive(Default)]
struct SharedState {
    pending_events: VecDeque<AppEvent>,
    outgoing: Vec<OutboundMessage>,
    renders: Vec<RenderRequest>,
    echo_as: Option<String>,
    fail_sends: bool,
    stopped: bool,
    last_snapshot: Option<AppSnapshot>,
}

/// Simulation driver for deterministic testing.
///
/// Clones share state, so a test can keep a handle while the runtime owns
/// the driver.
#[derive(Clone, Default)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    invariants: Option<Arc<InvariantRegistry>>,
}

impl SimDriver {
    /// Create a new simulation driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check invariants after every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(Arc::new(registry));
        self
    }

    /// Echo every send back as an inbound message from `nick`.
    #[must_use]
    pub fn with_echo(self, nick: impl Into<String>) -> Self {
        self.lock().echo_as = Some(nick.into());
        self
    }

    /// Make every send fail.
    pub fn fail_sends(&self, fail: bool) {
        self.lock().fail_sends = fail;
    }

    /// Inject an event for processing.
    pub fn inject_event(&self, event: impl Into<AppEvent>) {
        self.lock().pending_events.push_back(event.into());
    }

    /// Inject a sequence of events.
    pub fn inject_all(&self, events: impl IntoIterator<Item = AppEvent>) {
        self.lock().pending_events.extend(events);
    }

    /// Check if there are pending events to process.
    pub fn has_pending(&self) -> bool {
        !self.lock().pending_events.is_empty()
    }

    /// Take all captured outbound messages.
    pub fn take_outgoing(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut self.lock().outgoing)
    }

    /// Take all captured render requests.
    pub fn take_renders(&self) -> Vec<RenderRequest> {
        std::mem::take(&mut self.lock().renders)
    }

    /// Whether the runtime stopped the driver.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_invariants<E: Environment>(&self, app: &App<E>, request: &RenderRequest) {
        let Some(registry) = &self.invariants else {
            return;
        };

        let mut state = self.lock();
        let snapshot = match &state.last_snapshot {
            Some(previous) => AppSnapshot::following(app, previous),
            None => AppSnapshot::capture(app),
        };
        registry.assert_all(&snapshot, &format!("after {request:?}"));
        state.last_snapshot = Some(snapshot);
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        Ok(self.lock().pending_events.pop_front())
    }

    async fn send_message(&mut self, message: OutboundMessage) -> Result<(), Self::Error> {
        let mut state = self.lock();
        if state.fail_sends {
            return Err(SimDriverError(format!("transport down for {}", message.channel)));
        }

        if let Some(nick) = &state.echo_as {
            let echo = InboundEvent::Message {
                channel: message.channel.clone(),
                from: nick.clone(),
                text: message.text.clone(),
            };
            state.pending_events.push_back(AppEvent::Inbound(echo));
        }
        state.outgoing.push(message);
        Ok(())
    }

    fn render<E: Environment>(
        &mut self,
        app: &App<E>,
        request: &RenderRequest,
    ) -> Result<(), Self::Error> {
        self.lock().renders.push(request.clone());
        self.check_invariants(app, request);
        Ok(())
    }

    fn stop(&mut self) {
        self.lock().stopped = true;
    }
}
