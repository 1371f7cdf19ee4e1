//! Property-based tests for the App state machine.
//!
//! Tests verify that invariants hold under arbitrary operation sequences.
//! This ensures behavioral correctness across all possible execution paths.

use proptest::prelude::*;
use relaychat_app::{App, AppEvent, InboundEvent};
use relaychat_core::{ActivityError, Environment};
use relaychat_harness::{
    AppSnapshot, InvariantRegistry, Operation, SimEnv, SmallChannel, SmallNick,
};

fn channel_strategy() -> impl Strategy<Value = SmallChannel> {
    (0u8..4).prop_map(SmallChannel)
}

fn nick_strategy() -> impl Strategy<Value = SmallNick> {
    (0u8..3).prop_map(SmallNick)
}

/// Generate random operations, weighted towards message traffic.
fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        2 => channel_strategy().prop_map(Operation::Open),
        1 => channel_strategy().prop_map(Operation::Close),
        4 => (channel_strategy(), nick_strategy()).prop_map(|(c, n)| Operation::Message(c, n)),
        2 => (channel_strategy(), nick_strategy()).prop_map(|(c, n)| Operation::Join(c, n)),
        2 => (channel_strategy(), nick_strategy()).prop_map(|(c, n)| Operation::Part(c, n)),
        1 => (channel_strategy(), nick_strategy()).prop_map(|(c, n)| Operation::MemberAdded(c, n)),
        1 => (channel_strategy(), nick_strategy()).prop_map(|(c, n)| Operation::MemberRemoved(c, n)),
        2 => Just(Operation::FocusNext),
        1 => Just(Operation::FocusPrevious),
        1 => any::<u8>().prop_map(Operation::Type),
        1 => Just(Operation::Submit),
        2 => (0u8..3).prop_map(Operation::AdvanceTime),
    ]
}

/// Apply an operation to the app, advancing `env` for clock steps.
fn apply(app: &mut App<SimEnv>, env: &SimEnv, operation: &Operation) {
    match operation.to_event() {
        Some(event) => {
            let _ = app.handle(event);
        },
        None => {
            if let Operation::AdvanceTime(ticks) = operation {
                env.advance(u64::from(*ticks));
            }
        },
    }
}

fn message(channel: &str) -> AppEvent {
    AppEvent::Inbound(InboundEvent::Message {
        channel: channel.into(),
        from: "ada".into(),
        text: "hi".into(),
    })
}

fn open(app: &mut App<SimEnv>, channel: &str, buffer_id: u64) {
    let _ = app.handle(AppEvent::Inbound(InboundEvent::MemberListSnapshot {
        channel: channel.into(),
        buffer_id,
        members: vec![],
    }));
}

proptest! {
    /// Standard invariants hold after every operation.
    #[test]
    fn prop_app_invariants_hold(operations in prop::collection::vec(operation_strategy(), 0..80)) {
        let env = SimEnv::new();
        let mut app = App::new(env.clone());
        let invariants = InvariantRegistry::standard();
        let mut snapshot = AppSnapshot::capture(&app);

        for (step, operation) in operations.iter().enumerate() {
            apply(&mut app, &env, operation);

            snapshot = AppSnapshot::following(&app, &snapshot);
            let result = invariants.check_all(&snapshot);
            prop_assert!(result.is_ok(), "step {} {:?}: {:?}", step, operation, result);
        }
    }

    /// Strictly increasing timestamps rank buffers in reverse call order.
    #[test]
    fn prop_ranking_is_reverse_call_order(order in Just(vec![0u64, 1, 2, 3, 4]).prop_shuffle()) {
        let env = SimEnv::auto_advancing();
        let mut app = App::new(env);
        let names: Vec<_> = (0..5).map(|i| format!("#c{i}")).collect();
        for (id, name) in (1..).zip(&names) {
            open(&mut app, name, id);
        }

        for &i in &order {
            let _ = app.handle(message(&names[i as usize]));
        }

        let expected: Vec<_> = order.iter().rev().map(|&i| names[i as usize].clone()).collect();
        prop_assert_eq!(app.ranked_buffers(), expected);
    }

    /// Join/part churn never changes the most recently active buffer.
    #[test]
    fn prop_churn_does_not_rank(
        churn in prop::collection::vec((channel_strategy(), nick_strategy(), any::<bool>()), 0..30),
    ) {
        let env = SimEnv::auto_advancing();
        let mut app = App::new(env);
        for channel in (0..4).map(SmallChannel) {
            open(&mut app, channel.name(), channel.buffer_id());
        }
        let _ = app.handle(message("#rust"));

        for (channel, nick, joining) in churn {
            let operation = if joining {
                Operation::Join(channel, nick)
            } else {
                Operation::Part(channel, nick)
            };
            if let Some(event) = operation.to_event() {
                let _ = app.handle(event);
            }
        }

        prop_assert_eq!(app.most_recently_active(), Ok("#rust"));
        prop_assert_eq!(app.activity().len(), 1);
    }

    /// Events for unknown channels never mutate state.
    #[test]
    fn prop_unknown_channel_is_dropped(
        operations in prop::collection::vec(operation_strategy(), 0..30),
    ) {
        let env = SimEnv::new();
        let mut app = App::new(env.clone());
        for operation in &operations {
            apply(&mut app, &env, operation);
        }
        let before = AppSnapshot::capture(&app);
        let dropped = app.dropped_events();

        let _ = app.handle(message("#nowhere"));

        let after = AppSnapshot::capture(&app);
        prop_assert_eq!(before.buffers, after.buffers);
        prop_assert_eq!(before.ranked, after.ranked);
        prop_assert_eq!(app.dropped_events(), dropped + 1);
    }
}

#[test]
fn most_recent_follows_reregistration() {
    let env = SimEnv::new();
    let mut app = App::new(env.clone());
    for (id, name) in (1..).zip(["A", "B", "C"]) {
        open(&mut app, name, id);
    }

    for name in ["A", "B", "C"] {
        env.advance(1);
        let _ = app.handle(message(name));
    }
    assert_eq!(app.most_recently_active(), Ok("C"));

    env.advance(1);
    let _ = app.handle(message("A"));
    assert_eq!(app.most_recently_active(), Ok("A"));
    assert_eq!(app.ranked_buffers(), ["A", "C", "B"]);
}

#[test]
fn equal_timestamps_keep_previous_order() {
    let env = SimEnv::new();
    let mut app = App::new(env.clone());
    for (id, name) in (1..).zip(["A", "B", "C"]) {
        open(&mut app, name, id);
    }

    for name in ["A", "B", "C"] {
        let _ = app.handle(message(name));
    }
    assert_eq!(app.ranked_buffers(), ["A", "B", "C"]);

    let _ = app.handle(message("B"));
    assert_eq!(app.ranked_buffers(), ["A", "B", "C"]);

    env.advance(1);
    let _ = app.handle(message("C"));
    assert_eq!(app.ranked_buffers(), ["C", "A", "B"]);
}

#[test]
fn empty_tracker_has_no_active_buffer() {
    let env = SimEnv::new();
    let app = App::new(env.clone());

    assert_eq!(app.most_recently_active(), Err(ActivityError::NoActiveBuffer));
    assert_eq!(env.now(), 0);
}

#[test]
fn test_invariant_violation_detected() {
    // Manually create invalid state to verify invariants catch it
    let snapshot = AppSnapshot { focused: Some(3), ..AppSnapshot::empty() };

    let invariants = InvariantRegistry::standard();
    let result = invariants.check_all(&snapshot);

    assert!(result.is_err_and(|violations| {
        violations.iter().any(|v| v.invariant == "focus_in_bounds")
    }));
}
