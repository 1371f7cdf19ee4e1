//! Fuzz target for the App state machine
//!
//! Keep buffer routing and activity ranking consistent under any event order
//!
//! # Strategy
//!
//! - Channel churn: open, close and reopen channels from a small pool
//! - Duplicate snapshots: reopen channels that are already open
//! - Unknown channels: messages and joins for channels never opened
//! - Clock stalls: many events on the same tick to exercise tie-breaks
//! - Input: typing and submitting with and without a focused buffer
//!
//! # Invariants
//!
//! - Buffer names and ids stay unique
//! - Focus is in bounds whenever a buffer is open
//! - Ranking is ordered by last activity, newest first
//! - Only message events register activity
//! - Transcripts only grow while their buffer stays open

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use relaychat_app::{App, AppAction, AppEvent, KeyInput};
use relaychat_harness::{AppSnapshot, InvariantRegistry, Operation, SimEnv};

#[derive(Debug, Clone, Arbitrary)]
struct Session {
    operations: Vec<Operation>,
    /// Quit mid-session with Esc after this many steps.
    quit_after: Option<u8>,
}

fuzz_target!(|session: Session| {
    let env = SimEnv::new();
    let mut app = App::new(env.clone());
    let invariants = InvariantRegistry::standard();
    let mut snapshot = AppSnapshot::capture(&app);

    for (step, operation) in session.operations.iter().take(256).enumerate() {
        let actions = match operation.to_event() {
            Some(event) => app.handle(event),
            None => {
                if let Operation::AdvanceTime(ticks) = operation {
                    env.advance(u64::from(*ticks));
                }
                Vec::new()
            },
        };

        // Inbound events never ask the runtime to quit or send
        if !matches!(operation, Operation::Submit) {
            assert!(
                actions.iter().all(|action| matches!(action, AppAction::Render(_))),
                "step {step}: {operation:?} produced non-render actions {actions:?}"
            );
        }

        snapshot = AppSnapshot::following(&app, &snapshot);
        invariants.assert_all(&snapshot, &format!("step {step}: {operation:?}"));

        if session.quit_after == Some(u8::try_from(step).unwrap_or(u8::MAX)) {
            assert_eq!(app.handle(AppEvent::Key(KeyInput::Esc)), vec![AppAction::Quit]);
            break;
        }
    }
});
