//! Property-based tests for assignment generation
//!
//! These tests verify the invariants every accepted draw must satisfy:
//!
//! 1. **Totality**: every participant gives exactly once
//! 2. **Range**: recipients are a permutation of the roster
//! 3. **No self-assignment**: nobody draws themselves
//! 4. **No reciprocity**: no two participants draw each other
//! 5. **Determinism**: the same seed reproduces the same draw

use std::collections::BTreeSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use santa_core::{Assignment, AssignmentError, generate};

fn roster() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[A-Za-z]{1,12}", 3..40).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_assignment_is_total_permutation(roster in roster(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let assignment = generate(&roster, &mut rng).unwrap().assignment;

        prop_assert_eq!(assignment.len(), roster.len());

        let givers: BTreeSet<&str> = assignment.givers().collect();
        let recipients: BTreeSet<&str> = assignment.iter().map(|(_, r)| r).collect();
        let expected: BTreeSet<&str> = roster.iter().map(String::as_str).collect();

        prop_assert_eq!(&givers, &expected);
        prop_assert_eq!(&recipients, &expected);
    }

    #[test]
    fn prop_nobody_draws_themselves(roster in roster(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let assignment = generate(&roster, &mut rng).unwrap().assignment;

        for (giver, recipient) in assignment.iter() {
            prop_assert_ne!(giver, recipient);
        }
    }

    #[test]
    fn prop_no_mutual_pairs(roster in roster(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let assignment = generate(&roster, &mut rng).unwrap().assignment;

        for (giver, recipient) in assignment.iter() {
            prop_assert_ne!(
                assignment.recipient_of(recipient),
                Some(giver),
                "{} and {} drew each other",
                giver,
                recipient
            );
        }
    }

    #[test]
    fn prop_generated_assignment_passes_validation(roster in roster(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let assignment = generate(&roster, &mut rng).unwrap().assignment;

        let rebuilt = Assignment::from_pairs(assignment.iter()).unwrap();
        prop_assert_eq!(rebuilt, assignment);
    }

    #[test]
    fn prop_seed_determines_draw(roster in roster(), seed in any::<u64>()) {
        let first = generate(&roster, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
        let second = generate(&roster, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();

        prop_assert_eq!(first, second);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn prop_single_participant_always_exhausts(name in "[A-Za-z]{1,12}", seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let result = generate(&[name], &mut rng);

        prop_assert!(
            matches!(result, Err(AssignmentError::GenerationExhausted { participants: 1, .. })),
            "single participant must exhaust the retry budget"
        );
    }
}

#[test]
fn three_participants_only_produce_three_cycles() {
    let roster = ["Alice", "Bob", "Carol"];
    let forward =
        Assignment::from_pairs([("Alice", "Bob"), ("Bob", "Carol"), ("Carol", "Alice")]).unwrap();
    let backward =
        Assignment::from_pairs([("Alice", "Carol"), ("Bob", "Alice"), ("Carol", "Bob")]).unwrap();

    let mut seen_forward = false;
    let mut seen_backward = false;
    for seed in 0..64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let assignment = generate(&roster, &mut rng).unwrap().assignment;
        if assignment == forward {
            seen_forward = true;
        } else if assignment == backward {
            seen_backward = true;
        } else {
            panic!("unexpected draw for seed {seed}");
        }
    }

    assert!(seen_forward && seen_backward, "both 3-cycles should be reachable");
}
