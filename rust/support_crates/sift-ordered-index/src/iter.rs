//! In-order navigation and traversal.
//!
//! Traversal follows parent links instead of keeping an explicit stack, so it
//! allocates nothing and each step costs amortized `O(1)`.

use std::iter::FusedIterator;

use crate::arena::NodeId;
use crate::record::Record;
use crate::tree::OrderedIndex;

impl<R> OrderedIndex<R> {
    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.arena[id].left {
            id = left;
        }
        id
    }

    pub(crate) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.arena[id].right {
            id = right;
        }
        id
    }

    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.arena[id].right {
            return Some(self.leftmost(right));
        }
        let mut child = id;
        let mut parent = self.arena[id].parent;
        while let Some(p) = parent {
            if self.arena[p].left == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.arena[p].parent;
        }
        None
    }

    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.arena[id].left {
            return Some(self.rightmost(left));
        }
        let mut child = id;
        let mut parent = self.arena[id].parent;
        while let Some(p) = parent {
            if self.arena[p].right == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.arena[p].parent;
        }
        None
    }

    /// Returns the record with the smallest key.
    pub fn first(&self) -> Option<&R> {
        self.root.map(|root| &self.arena[self.leftmost(root)].record)
    }

    /// Returns the record with the largest key.
    pub fn last(&self) -> Option<&R> {
        self.root.map(|root| &self.arena[self.rightmost(root)].record)
    }

    /// Iterates over the records in ascending key order. The iterator is
    /// double-ended; use `.rev()` for descending order.
    pub fn iter(&self) -> Iter<'_, R> {
        Iter {
            index: self,
            front: self.root.map(|root| self.leftmost(root)),
            back: self.root.map(|root| self.rightmost(root)),
            remaining: self.len(),
        }
    }

    /// Calls `visitor` once for every record, in ascending key order.
    ///
    /// The visitor only gets shared access, so the index cannot be modified
    /// while the traversal is running.
    pub fn forward_apply<F>(&self, mut visitor: F)
    where
        F: FnMut(&R),
    {
        for record in self.iter() {
            visitor(record);
        }
    }

    /// Calls `visitor` once for every record, in descending key order.
    ///
    /// The visitor only gets shared access, so the index cannot be modified
    /// while the traversal is running.
    pub fn backward_apply<F>(&self, mut visitor: F)
    where
        F: FnMut(&R),
    {
        for record in self.iter().rev() {
            visitor(record);
        }
    }
}

impl<R: Record> OrderedIndex<R> {
    /// Returns the record that follows the one stored under `key`.
    ///
    /// Returns `None` if `key` is not present or its record is the last one.
    pub fn next(&self, key: &R::Key) -> Option<&R> {
        let id = self.locate(key)?;
        self.successor(id).map(|id| &self.arena[id].record)
    }

    /// Returns the record that precedes the one stored under `key`.
    ///
    /// Returns `None` if `key` is not present or its record is the first one.
    pub fn previous(&self, key: &R::Key) -> Option<&R> {
        let id = self.locate(key)?;
        self.predecessor(id).map(|id| &self.arena[id].record)
    }
}

/// In-order iterator over the records of an [`OrderedIndex`].
pub struct Iter<'a, R> {
    index: &'a OrderedIndex<R>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, R> Iterator for Iter<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<&'a R> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.index;
        let id = self.front?;
        self.remaining -= 1;
        self.front = index.successor(id);
        Some(&index.arena[id].record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R> DoubleEndedIterator for Iter<'_, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.index;
        let id = self.back?;
        self.remaining -= 1;
        self.back = index.predecessor(id);
        Some(&index.arena[id].record)
    }
}

impl<R> ExactSizeIterator for Iter<'_, R> {}

impl<R> FusedIterator for Iter<'_, R> {}

impl<'a, R> IntoIterator for &'a OrderedIndex<R> {
    type Item = &'a R;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Iter<'a, R> {
        self.iter()
    }
}
