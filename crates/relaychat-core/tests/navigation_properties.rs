//! Property-based tests for positional focus.

use proptest::prelude::*;
use relaychat_core::FocusState;

proptest! {
    #[test]
    fn prop_len_steps_forward_return_to_start(len in 1usize..16, start in 0usize..16) {
        let start = start % len;
        let mut focus = FocusState::new();
        focus.focus(start);

        for _ in 0..len {
            let _ = focus.next(len);
        }

        prop_assert_eq!(focus.index(), Some(start));
    }

    #[test]
    fn prop_next_then_previous_is_identity(len in 1usize..16, start in 0usize..16) {
        let start = start % len;
        let mut focus = FocusState::new();
        focus.focus(start);

        let _ = focus.next(len);
        let _ = focus.previous(len);

        prop_assert_eq!(focus.index(), Some(start));
    }

    #[test]
    fn prop_focus_stays_in_bounds(
        len in 0usize..8,
        steps in prop::collection::vec(any::<bool>(), 0..32),
    ) {
        let mut focus = FocusState::new();
        for forward in steps {
            let moved = if forward { focus.next(len) } else { focus.previous(len) };
            prop_assert_eq!(moved.is_some(), len > 0);
            if let Some(index) = moved {
                prop_assert!(index < len);
            }
        }
    }
}
