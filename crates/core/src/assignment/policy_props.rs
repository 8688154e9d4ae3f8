//! Property-based tests for OrderedListPolicy.
//!
//! - priorities are exactly 0..n-1 in input order
//! - planning the same request twice yields the same mapping

use std::collections::HashSet;

use feedesk_shared::types::{BatchId, PaymentSourceId};
use proptest::prelude::*;

use super::policy::{AssignmentPolicy, OrderedListPolicy};

/// Strategy picking an ordered list (with repeats) out of a source pool.
fn ordered_ids() -> impl Strategy<Value = (Vec<PaymentSourceId>, Vec<usize>)> {
    (1usize..8).prop_flat_map(|pool| {
        let sources: Vec<PaymentSourceId> = (0..pool).map(|_| PaymentSourceId::new()).collect();
        (Just(sources), prop::collection::vec(0..pool, 1..12))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_priorities_follow_input_order((pool, picks) in ordered_ids()) {
        let ordered: Vec<PaymentSourceId> = picks.iter().map(|i| pool[*i]).collect();
        let known: HashSet<PaymentSourceId> = pool.iter().copied().collect();

        let plan = OrderedListPolicy.plan(Some(BatchId::new()), &ordered, &known).unwrap();

        prop_assert_eq!(plan.rows.len(), ordered.len());
        for (i, row) in plan.rows.iter().enumerate() {
            prop_assert_eq!(row.priority, i32::try_from(i).unwrap());
            prop_assert_eq!(row.source_id, ordered[i]);
        }
    }

    #[test]
    fn prop_planning_is_repeatable((pool, picks) in ordered_ids()) {
        let ordered: Vec<PaymentSourceId> = picks.iter().map(|i| pool[*i]).collect();
        let known: HashSet<PaymentSourceId> = pool.iter().copied().collect();
        let batch = BatchId::new();

        let first = OrderedListPolicy.plan(Some(batch), &ordered, &known).unwrap();
        let second = OrderedListPolicy.plan(Some(batch), &ordered, &known).unwrap();
        prop_assert_eq!(first, second);
    }
}
