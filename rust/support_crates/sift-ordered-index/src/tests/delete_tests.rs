use std::collections::BTreeSet;

use crate::OrderedIndex;
use crate::arena::Balance;

use super::{Tracked, build, keys_of, max_avl_height, root_key, shuffled};

#[test]
fn test_delete_from_empty_is_noop() {
    let mut index = OrderedIndex::<u32>::new();
    assert!(!index.delete(&1));
    assert!(index.is_empty());
    index.validate().unwrap();
}

#[test]
fn test_delete_absent_key() {
    let mut index = build([10, 20, 30]);
    assert!(!index.delete(&25));
    assert_eq!(index.len(), 3);
    assert_eq!(keys_of(&index), vec![10, 20, 30]);
}

#[test]
fn test_delete_only_node() {
    let mut index = build([5]);
    assert!(index.delete(&5));
    assert!(index.is_empty());
    assert_eq!(index.height(), 0);
    assert!(index.find(&5).is_none());
    assert!(index.first().is_none());
    index.validate().unwrap();
}

#[test]
fn test_delete_leaf_and_single_child() {
    let mut index = build([20, 10, 30, 25]);
    // Leaf.
    assert!(index.delete(&10));
    index.validate().unwrap();
    assert_eq!(keys_of(&index), vec![20, 25, 30]);

    // 30 has a single (left) child.
    let mut index = build([20, 10, 30, 25]);
    assert!(index.delete(&30));
    index.validate().unwrap();
    assert_eq!(keys_of(&index), vec![10, 20, 25]);
}

#[test]
fn test_delete_node_with_two_children() {
    Tracked::reset_counters();
    let mut index = OrderedIndex::<Tracked>::new();
    for key in [50, 30, 70, 20, 40, 60, 80] {
        index.insert(&key).unwrap().0.hits = key;
    }

    assert!(index.delete(&50));
    index.validate().unwrap();
    assert!(index.find(&50).is_none());
    assert_eq!(
        index.iter().map(|r| r.key).collect::<Vec<_>>(),
        vec![20, 30, 40, 60, 70, 80]
    );
    // The predecessor's record moved into the root node, payload included.
    let root = index.root.unwrap();
    assert_eq!(index.arena[root].record.key, 40);
    assert_eq!(index.arena[root].record.hits, 40);
    assert_eq!(Tracked::assigned(), 1);
    assert_eq!(Tracked::dropped(), 1);
}

#[test]
fn test_delete_destroys_each_record_once() {
    Tracked::reset_counters();
    let mut index = OrderedIndex::<Tracked>::new();
    for key in shuffled(300, 5) {
        index.insert(&key).unwrap();
    }
    for (i, key) in shuffled(300, 6).into_iter().enumerate() {
        assert!(index.delete(&key));
        assert_eq!(Tracked::dropped(), i + 1);
        assert_eq!(index.len(), 300 - i - 1);
    }
    assert!(index.is_empty());
    assert_eq!(Tracked::constructed(), 300);
}

#[test]
fn test_clear_and_drop_destroy_records() {
    Tracked::reset_counters();
    let mut index = OrderedIndex::<Tracked>::new();
    for key in 0..10 {
        index.insert(&key).unwrap();
    }
    index.clear();
    assert_eq!(Tracked::dropped(), 10);
    assert!(index.is_empty());

    for key in 0..5 {
        index.insert(&key).unwrap();
    }
    drop(index);
    assert_eq!(Tracked::dropped(), 15);
}

#[test]
fn test_delete_rotation_over_balanced_child_keeps_height() {
    //     2              4
    //    / \            / \
    //   1   4    =>    2   5
    //      / \          \
    //     3   5          3
    let mut index = build([2, 1, 4, 3, 5]);
    assert!(index.delete(&1));
    index.validate().unwrap();
    assert_eq!(root_key(&index), Some(4));
    assert_eq!(index.height(), 3);
    let root = index.root.unwrap();
    assert_eq!(index.arena[root].balance, Balance::LeftHigh);
}

#[test]
fn test_delete_with_cascading_rotations() {
    // A minimal (Fibonacci) AVL tree of height 5; deleting its shallowest
    // leaf forces rebalancing at more than one level.
    let keys = [8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1];
    let mut index = build(keys);
    index.validate().unwrap();
    assert_eq!(index.height(), 5);

    assert!(index.delete(&12));
    index.validate().unwrap();
    assert_eq!(index.height(), 4);
    assert_eq!(keys_of(&index), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
}

#[test]
fn test_deletion_law() {
    let mut index = build(shuffled(100, 3));
    for key in (0..150).step_by(3) {
        let before = index.len();
        let present = index.find(&key).is_some();
        assert_eq!(index.delete(&key), present);
        assert!(index.find(&key).is_none());
        assert_eq!(index.len(), if present { before - 1 } else { before });
        index.validate().unwrap();
    }
}

#[test]
fn test_random_operations_match_model() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    let mut index = OrderedIndex::<u32>::new();
    let mut model = BTreeSet::new();

    for step in 0..5000 {
        let key = rng.u32(0..400);
        if rng.u8(0..3) == 0 {
            assert_eq!(index.delete(&key), model.remove(&key), "step {step}");
        } else {
            let (_, inserted) = index.insert(&key).unwrap();
            assert_eq!(inserted, model.insert(key), "step {step}");
        }
        assert_eq!(index.len(), model.len());
        if step % 50 == 0 {
            index.validate().unwrap();
            assert!(index.height() <= max_avl_height(index.len()));
        }
    }
    index.validate().unwrap();
    assert_eq!(keys_of(&index), model.into_iter().collect::<Vec<_>>());
}
