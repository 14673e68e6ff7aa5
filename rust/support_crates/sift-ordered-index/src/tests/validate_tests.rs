use sift_common::error::{Error, ErrorKind};

use crate::OrderedIndex;
use crate::arena::Balance;

use super::build;

fn assert_invariant_violation(result: sift_common::Result<()>, expected: &str) {
    let err: Error = result.unwrap_err();
    match err.kind() {
        ErrorKind::InvariantViolation { message } => {
            assert!(message.contains(expected), "{message}")
        }
        other => panic!("unexpected error kind: {other:?}"),
    }
}

/// Root 2 with leaves 1 and 3.
fn small_tree() -> OrderedIndex<u32> {
    let index = build([2, 1, 3]);
    index.validate().unwrap();
    index
}

#[test]
fn test_validate_detects_wrong_balance_indicator() {
    let mut index = small_tree();
    let root = index.root.unwrap();
    index.arena[root].balance = Balance::LeftHigh;
    assert_invariant_violation(index.validate(), "records LeftHigh");
}

#[test]
fn test_validate_detects_broken_parent_link() {
    let mut index = small_tree();
    let root = index.root.unwrap();
    let left = index.arena[root].left.unwrap();
    index.arena[left].parent = None;
    assert_invariant_violation(index.validate(), "does not point back at its parent");
}

#[test]
fn test_validate_detects_misordered_children() {
    let mut index = small_tree();
    let root = index.root.unwrap();
    let left = index.arena[root].left.unwrap();
    let right = index.arena[root].right.unwrap();
    index.arena[left].record = 3;
    index.arena[right].record = 1;
    assert_invariant_violation(index.validate(), "Ordering::Less");
}

#[test]
fn test_validate_detects_height_imbalance() {
    //   2          2
    //  / \          \
    // 1   3    =>    3
    //      \          \
    //       4          4
    let mut index = build([2, 1, 3, 4]);
    let root = index.root.unwrap();
    let left = index.arena[root].left.unwrap();
    index.arena[root].left = None;
    index.arena[left].parent = None;
    assert_eq!(index.arena[root].balance, Balance::RightHigh);
    assert_invariant_violation(index.validate(), "out of balance");
}

#[test]
fn test_validate_detects_parent_link_on_root() {
    let mut index = small_tree();
    let root = index.root.unwrap();
    let left = index.arena[root].left.unwrap();
    index.arena[root].parent = Some(left);
    assert_invariant_violation(index.validate(), "parent.is_none()");
}
