use itertools::Itertools;

use crate::OrderedIndex;

use super::{build, keys_of, shuffled};

#[test]
fn test_forward_and_backward_apply() {
    let mut index = build(shuffled(257, 9));
    for key in (0..257).filter(|k| k % 4 == 1) {
        index.delete(&key);
    }

    let mut forward = Vec::new();
    index.forward_apply(|key| forward.push(*key));
    assert_eq!(forward.len(), index.len());
    assert!(forward.iter().tuple_windows().all(|(a, b)| a < b));

    let mut backward = Vec::new();
    index.backward_apply(|key| backward.push(*key));
    forward.reverse();
    assert_eq!(backward, forward);
}

#[test]
fn test_traversal_of_empty_index() {
    let index = OrderedIndex::<u32>::new();
    let mut visited = 0;
    index.forward_apply(|_| visited += 1);
    index.backward_apply(|_| visited += 1);
    assert_eq!(visited, 0);
    assert_eq!(index.iter().next(), None);
    assert_eq!(index.iter().next_back(), None);
    assert!(index.first().is_none());
    assert!(index.last().is_none());
}

#[test]
fn test_first_last_next_previous() {
    let index = build([40, 10, 30, 20, 50]);
    assert_eq!(index.first(), Some(&10));
    assert_eq!(index.last(), Some(&50));

    assert_eq!(index.next(&10), Some(&20));
    assert_eq!(index.next(&30), Some(&40));
    assert_eq!(index.next(&50), None);
    assert_eq!(index.previous(&50), Some(&40));
    assert_eq!(index.previous(&20), Some(&10));
    assert_eq!(index.previous(&10), None);

    // Navigation starts from a stored key only.
    assert_eq!(index.next(&35), None);
    assert_eq!(index.previous(&35), None);
}

#[test]
fn test_next_walks_the_whole_index() {
    let index = build(shuffled(1000, 21));
    let mut walked = Vec::new();
    let mut current = index.first().copied();
    while let Some(key) = current {
        walked.push(key);
        current = index.next(&key).copied();
    }
    assert_eq!(walked, (0..1000).collect::<Vec<_>>());

    let mut walked = Vec::new();
    let mut current = index.last().copied();
    while let Some(key) = current {
        walked.push(key);
        current = index.previous(&key).copied();
    }
    assert_eq!(walked, (0..1000).rev().collect::<Vec<_>>());
}

#[test]
fn test_double_ended_iteration_meets_in_the_middle() {
    let index = build(0..11);
    let mut iter = index.iter();
    assert_eq!(iter.len(), 11);

    let mut seen = Vec::new();
    loop {
        match (iter.next(), iter.next_back()) {
            (Some(a), Some(b)) => {
                seen.push(*a);
                seen.push(*b);
            }
            (Some(a), None) => seen.push(*a),
            (None, _) => break,
        }
    }
    assert_eq!(iter.len(), 0);
    assert_eq!(iter.next(), None);
    seen.sort_unstable();
    assert_eq!(seen, (0..11).collect::<Vec<_>>());
}

#[test]
fn test_into_iterator_and_debug() {
    let index = build([3, 1, 2]);
    let mut sum = 0;
    for key in &index {
        sum += key;
    }
    assert_eq!(sum, 6);
    assert_eq!(format!("{index:?}"), "{1, 2, 3}");
    assert_eq!(keys_of(&index), vec![1, 2, 3]);
}
