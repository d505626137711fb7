use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sgtree::{BalanceFactor, BuildError, DefaultBalance, Ratio, SGTreeSet};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

type ThreeQuarters = Ratio<3, 4>;

/// Generates values in a range that ensures collisions.
fn value_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

/// Largest depth (root = 0) any node may have, given the peak size.
#[allow(clippy::cast_precision_loss)]
fn depth_bound<B: BalanceFactor>(max_size: usize) -> f64 {
    (max_size as f64).ln() / -B::ALPHA.ln() + 2.0
}

/// Asserts that a tree with `height` levels fits the height bound for `max_size`.
#[allow(clippy::cast_precision_loss)]
fn assert_height_within_bound<B: BalanceFactor>(height: usize, max_size: usize) {
    if height == 0 {
        return;
    }
    let deepest = (height - 1) as f64;
    let bound = depth_bound::<B>(max_size);
    assert!(deepest <= bound + 1e-9, "depth {deepest} exceeds bound {bound} for max_size {max_size}");
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Remove(i64),
    Contains(i64),
    First,
    Last,
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SetOp::Insert),
        3 => value_strategy().prop_map(SetOp::Remove),
        2 => value_strategy().prop_map(SetOp::Contains),
        1 => Just(SetOp::First),
        1 => Just(SetOp::Last),
    ]
}

// ─── Core operations ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both SGTreeSet and BTreeSet
    /// and asserts identical results at every step.
    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut sg_set: SGTreeSet<i64> = SGTreeSet::new();
        let mut bt_set: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                SetOp::Insert(v) => {
                    prop_assert_eq!(sg_set.insert(*v), bt_set.insert(*v), "insert({})", v);
                }
                SetOp::Remove(v) => {
                    prop_assert_eq!(sg_set.remove(v), bt_set.remove(v), "remove({})", v);
                }
                SetOp::Contains(v) => {
                    prop_assert_eq!(sg_set.contains(v), bt_set.contains(v), "contains({})", v);
                }
                SetOp::First => {
                    prop_assert_eq!(sg_set.first(), bt_set.first(), "first()");
                }
                SetOp::Last => {
                    prop_assert_eq!(sg_set.last(), bt_set.last(), "last()");
                }
            }
            prop_assert_eq!(sg_set.len(), bt_set.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(sg_set.is_empty(), bt_set.is_empty(), "is_empty mismatch after {:?}", op);
        }

        let sg_items = sg_set.to_vec();
        let bt_items: Vec<_> = bt_set.iter().copied().collect();
        prop_assert_eq!(sg_items, bt_items);
    }

    /// `to_vec()` is strictly ascending and as long as `len()` after every operation.
    #[test]
    fn sequence_is_strictly_ascending(ops in proptest::collection::vec(set_op_strategy(), 0..500)) {
        let mut set: SGTreeSet<i64, ThreeQuarters> = SGTreeSet::default();

        for op in &ops {
            match op {
                SetOp::Insert(v) => {
                    set.insert(*v);
                }
                SetOp::Remove(v) => {
                    set.remove(v);
                }
                _ => {}
            }
            let items = set.to_vec();
            prop_assert!(items.windows(2).all(|pair| pair[0] < pair[1]), "not ascending after {:?}", op);
            prop_assert_eq!(items.len(), set.len());
        }
    }

    /// Membership matches a model that tracks inserts and removes.
    #[test]
    fn membership_matches_history(
        inserts in proptest::collection::vec(value_strategy(), 0..500),
        removes in proptest::collection::vec(value_strategy(), 0..500),
    ) {
        let mut set: SGTreeSet<i64> = inserts.iter().copied().collect();
        for v in &removes {
            set.remove(v);
        }

        let mut model: BTreeSet<i64> = inserts.iter().copied().collect();
        for v in &removes {
            model.remove(v);
        }

        for v in -2_000i64..2_000 {
            prop_assert_eq!(set.contains(&v), model.contains(&v), "contains({})", v);
        }
    }

    /// Inserting only, the peak size equals the size, so the height bound can
    /// be checked from outside after every step.
    #[test]
    fn height_bound_holds_after_every_insert(values in proptest::collection::vec(value_strategy(), 1..TEST_SIZE)) {
        let mut set: SGTreeSet<i64, ThreeQuarters> = SGTreeSet::default();
        for v in values {
            set.insert(v);
            assert_height_within_bound::<ThreeQuarters>(set.height(), set.len());
        }
    }

    /// Building from a sorted unique sequence and reading it back is the identity.
    #[test]
    fn from_sorted_round_trip(values in proptest::collection::btree_set(value_strategy(), 0..TEST_SIZE)) {
        let expected: Vec<i64> = values.iter().copied().collect();
        let set: SGTreeSet<i64> = SGTreeSet::from_sorted(expected.iter().copied());
        prop_assert_eq!(set.to_vec(), expected.clone());
        prop_assert_eq!(set.len(), expected.len());

        let checked: SGTreeSet<i64> = SGTreeSet::try_from_sorted(expected.iter().copied()).unwrap();
        prop_assert_eq!(checked, set);
    }

    /// A second insert of the same value changes nothing.
    #[test]
    fn insert_is_idempotent(values in proptest::collection::vec(value_strategy(), 0..200), v in value_strategy()) {
        let mut once: SGTreeSet<i64> = values.iter().copied().collect();
        once.insert(v);
        let mut twice = once.clone();
        prop_assert!(!twice.insert(v));
        prop_assert_eq!(once.to_vec(), twice.to_vec());
    }

    /// Iteration order matches BTreeSet.
    #[test]
    fn iter_matches_btreeset(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let sg_set: SGTreeSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.iter().copied().collect();

        let sg_items: Vec<_> = sg_set.iter().copied().collect();
        let bt_items: Vec<_> = bt_set.iter().copied().collect();
        prop_assert_eq!(&sg_items, &bt_items, "iter() mismatch");
        prop_assert_eq!(sg_set.iter().len(), bt_set.len());

        let sg_into: Vec<_> = sg_set.clone().into_iter().collect();
        prop_assert_eq!(&sg_into, &bt_items, "into_iter() mismatch");

        let sg_rev: Vec<_> = sg_set.into_iter().rev().collect();
        let bt_rev: Vec<_> = bt_set.into_iter().rev().collect();
        prop_assert_eq!(sg_rev, bt_rev, "into_iter().rev() mismatch");
    }
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn ascending_seven_with_three_quarters() {
    let mut set: SGTreeSet<i32, ThreeQuarters> = SGTreeSet::default();
    for i in 1..=7 {
        assert!(set.insert(i));
    }
    assert_eq!(set.to_vec(), vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(set.len(), 7);
}

#[test]
fn erase_down_to_one_from_built_tree() {
    let mut set: SGTreeSet<i32, ThreeQuarters> = SGTreeSet::from_sorted([1, 2, 3, 4, 5]);
    for i in 1..=4 {
        assert!(set.remove(&i));
        assert_eq!(set.len(), 5 - i as usize);
    }
    assert_eq!(set.to_vec(), vec![5]);
    assert_eq!(set.len(), 1);
    assert_eq!(set.height(), 1);
}

#[test]
fn hundred_ascending_inserts_stay_shallow() {
    let mut set: SGTreeSet<i32, ThreeQuarters> = SGTreeSet::default();
    for i in 0..100 {
        set.insert(i);
        assert_height_within_bound::<ThreeQuarters>(set.height(), set.len());
    }
    assert_eq!(set.to_vec(), (0..100).collect::<Vec<_>>());
}

#[test]
fn descending_inserts_stay_shallow() {
    let mut set: SGTreeSet<i32> = SGTreeSet::new();
    for i in (0..5_000).rev() {
        set.insert(i);
    }
    assert_height_within_bound::<DefaultBalance>(set.height(), set.len());
}

#[test]
fn near_one_alpha_handles_long_spines() {
    // With alpha this close to one, ascending runs build spines thousands of nodes deep.
    type Loose = Ratio<999, 1000>;
    let mut set: SGTreeSet<u32, Loose> = SGTreeSet::default();
    for i in 0..20_000 {
        assert!(set.insert(i));
    }
    assert!(set.height() > 2_000, "height {}", set.height());
    assert_height_within_bound::<Loose>(set.height(), set.len());
    assert_eq!(set.first(), Some(&0));
    assert_eq!(set.last(), Some(&19_999));
    assert!(set.iter().copied().eq(0..20_000));

    let copy = set.clone();
    assert_eq!(copy.into_iter().count(), 20_000);

    for i in 0..20_000 {
        assert!(set.remove(&i));
    }
    assert!(set.is_empty());
}

#[test]
fn shrinking_set_releases_capacity() {
    let mut set: SGTreeSet<i32, ThreeQuarters> = SGTreeSet::from_sorted(0..1_000);
    assert!(set.capacity() >= 1_000);
    for i in 0..900 {
        assert!(set.remove(&i));
    }
    assert_eq!(set.to_vec(), (900..1_000).collect::<Vec<_>>());
    // The last whole-tree rebuild ran at 131 elements.
    assert!(set.capacity() < 500, "capacity {}", set.capacity());
}

#[test]
fn empty_set_queries() {
    let mut set: SGTreeSet<i32> = SGTreeSet::new();
    assert!(set.is_empty());
    assert!(!set.contains(&1));
    assert!(!set.remove(&1));
    assert_eq!(set.first(), None);
    assert_eq!(set.height(), 0);
    assert_eq!(set.to_vec(), Vec::<i32>::new());
}

#[test]
fn try_from_sorted_reports_first_offender() {
    let err = SGTreeSet::<i32>::try_from_sorted([1, 2, 5, 4, 3]).unwrap_err();
    assert_eq!(err, BuildError::NotStrictlyAscending { index: 3 });
}

#[test]
fn borrowed_lookups() {
    let mut set: SGTreeSet<String> = SGTreeSet::new();
    set.insert("beta".to_string());
    set.insert("alpha".to_string());
    assert!(set.contains("alpha"));
    assert_eq!(set.get("beta").map(String::as_str), Some("beta"));
    assert_eq!(set.take("alpha"), Some("alpha".to_string()));
    assert!(!set.contains("alpha"));
}

#[test]
fn drain_then_refill() {
    let mut set: SGTreeSet<i32> = (0..1_000).collect();
    for i in 0..1_000 {
        assert!(set.remove(&i));
    }
    assert!(set.is_empty());
    assert_eq!(set.height(), 0);

    set.extend(0..10);
    assert_eq!(set.to_vec(), (0..10).collect::<Vec<_>>());
}

// ─── Fixed insertion patterns ───────────────────────────────────────────────

/// Helper function to generate deterministic pseudo-random values using LCG.
fn random_values_deterministic(n: usize) -> Vec<i64> {
    let mut values = Vec::with_capacity(n);
    let mut x: u64 = 12345; // Fixed seed for reproducibility
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        values.push((x >> 33) as i64);
    }
    values
}

mod insertion_pattern_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const N: usize = 10_000;

    #[test]
    fn random_inserts_match_btreeset() {
        let values = random_values_deterministic(N);
        let sg_set: SGTreeSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.iter().copied().collect();

        assert_eq!(sg_set.len(), bt_set.len());
        assert_eq!(sg_set.to_vec(), bt_set.iter().copied().collect::<Vec<_>>());
        assert_eq!(sg_set.first(), bt_set.first());
        assert_eq!(sg_set.last(), bt_set.last());
        assert_height_within_bound::<DefaultBalance>(sg_set.height(), sg_set.len());
    }

    #[test]
    fn ordered_removes_match_btreeset() {
        let mut sg_set: SGTreeSet<i64> = (0..N as i64).collect();
        let mut bt_set: BTreeSet<i64> = (0..N as i64).collect();

        for i in (0..N as i64).step_by(3) {
            assert_eq!(sg_set.remove(&i), bt_set.remove(&i));
        }

        assert_eq!(sg_set.to_vec(), bt_set.iter().copied().collect::<Vec<_>>());
    }

    #[test]
    fn random_insert_then_random_remove() {
        let values = random_values_deterministic(N);
        let mut sg_set: SGTreeSet<i64> = values.iter().copied().collect();
        let mut bt_set: BTreeSet<i64> = values.iter().copied().collect();

        for v in values.iter().rev().step_by(2) {
            assert_eq!(sg_set.remove(v), bt_set.remove(v), "remove({v})");
        }

        assert_eq!(sg_set.len(), bt_set.len());
        assert_eq!(sg_set.to_vec(), bt_set.iter().copied().collect::<Vec<_>>());
    }
}

#[test]
fn trait_surface() {
    let a = SGTreeSet::from([3, 1, 2]);
    let b: SGTreeSet<i32> = SGTreeSet::from_sorted([1, 2, 3]);
    assert_eq!(a, b);
    assert_eq!(format!("{a:?}"), "{1, 2, 3}");

    let default: SGTreeSet<i32> = SGTreeSet::default();
    assert!(default.is_empty());

    let mut hashes = std::collections::HashSet::new();
    hashes.insert(a.clone());
    assert!(hashes.contains(&b));

    let borrowed: Vec<_> = (&a).into_iter().copied().collect();
    assert_eq!(borrowed, vec![1, 2, 3]);

    let with_capacity: SGTreeSet<i32> = SGTreeSet::with_capacity(8);
    assert!(with_capacity.capacity() >= 8);
}
