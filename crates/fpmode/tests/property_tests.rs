//! Property-based tests for the mode lattice.
//!
//! `join` is the load-bearing operation of the whole pass: these
//! properties pin down its group-atomic merge semantics for arbitrary
//! states rather than hand-picked cases.

use proptest::prelude::*;

use fpmode::{ModeField, ModeMask, ModeState};

fn mode_state_strategy() -> impl Strategy<Value = ModeState> {
    (proptest::array::uniform5(0u8..4u8), 0u8..32u8).prop_map(|(values, pinned)| {
        let mut state = ModeState::default();
        for (i, field) in ModeField::ALL.into_iter().enumerate() {
            if pinned & (1 << i) != 0 {
                state.require(field, values[i]);
            }
        }
        state
    })
}

/// A group conflicts iff some field in it is pinned by both sides to
/// different values.
fn expect_conflict(a: &ModeState, b: &ModeState, group: ModeMask) -> bool {
    (a.required() & b.required() & group)
        .iter()
        .any(|f| a.field(f) != b.field(f))
}

proptest! {
    #[test]
    fn join_with_self_is_idempotent(s in mode_state_strategy()) {
        let mut joined = s;
        let conflicts = joined.join(&s);
        prop_assert!(conflicts.is_empty());
        prop_assert_eq!(joined, s);
    }

    #[test]
    fn join_is_group_atomic(a in mode_state_strategy(), b in mode_state_strategy()) {
        let mut joined = a;
        let conflicts = joined.join(&b);

        for group in ModeMask::GROUPS {
            if expect_conflict(&a, &b, group) {
                // The whole group is reported and left untouched.
                prop_assert_eq!(conflicts & group, group);
                prop_assert_eq!(joined.required() & group, a.required() & group);
                for field in group.iter() {
                    prop_assert_eq!(joined.field(field), a.field(field));
                }
            } else {
                // The group merged: everything pinned by either side is
                // pinned in the result, with the original side winning
                // where both pinned.
                prop_assert!((conflicts & group).is_empty());
                prop_assert_eq!(
                    joined.required() & group,
                    (a.required() | b.required()) & group
                );
                for field in group.iter() {
                    if a.required().contains(field) {
                        prop_assert_eq!(joined.field(field), a.field(field));
                    } else if b.required().contains(field) {
                        prop_assert_eq!(joined.field(field), b.field(field));
                    }
                }
            }
        }
    }

    #[test]
    fn releasing_conflicting_groups_makes_the_retry_clean(
        a in mode_state_strategy(),
        b in mode_state_strategy(),
    ) {
        // This is the emitter's contract: after a mode write covers the
        // conflicting groups (releasing them from one side), the retried
        // join must succeed.
        let mut joined = a;
        let conflicts = joined.join(&b);
        let mut covered = b;
        covered.release(conflicts);
        prop_assert!(joined.join(&covered).is_empty());
    }
}
