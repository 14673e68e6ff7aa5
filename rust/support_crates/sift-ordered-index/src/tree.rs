//! Height-balanced (AVL) binary search tree over caller-defined records.

use std::cmp::Ordering;
use std::fmt;

use sift_common::{Result, error::Error, verify_invariant};

use crate::arena::{Balance, Node, NodeArena, NodeId, Side};
use crate::record::Record;

/// An ordered set of records kept in an AVL tree.
///
/// Each record is identified by its key (see [`Record`]); no two records in
/// the index compare equal. Lookups, insertions and deletions take
/// `O(log n)`; ordered traversal is linear.
///
/// Nodes are stored in an arena and linked by handles. Every node knows its
/// parent, which is used to walk back towards the root while rebalancing and
/// to step to the in-order successor or predecessor without a stack.
///
/// The index performs no internal synchronization. Shared references allow
/// concurrent lookups and traversals; mutation requires exclusive access.
pub struct OrderedIndex<R> {
    pub(crate) arena: NodeArena<R>,
    pub(crate) root: Option<NodeId>,
}

impl<R> OrderedIndex<R> {
    /// Creates an empty index.
    pub fn new() -> OrderedIndex<R> {
        OrderedIndex {
            arena: NodeArena::new(usize::MAX),
            root: None,
        }
    }

    /// Creates an empty index with room for `capacity` records before the
    /// node storage has to grow.
    pub fn with_capacity(capacity: usize) -> OrderedIndex<R> {
        OrderedIndex {
            arena: NodeArena::with_capacity(capacity, usize::MAX),
            root: None,
        }
    }

    /// Creates an empty index that refuses to hold more than `node_limit`
    /// records. Inserting past the limit fails with an allocation error.
    pub fn with_node_limit(node_limit: usize) -> OrderedIndex<R> {
        OrderedIndex {
            arena: NodeArena::new(node_limit),
            root: None,
        }
    }

    /// Returns the number of records in the index.
    pub fn len(&self) -> usize {
        self.arena.live()
    }

    /// Returns `true` if the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Destroys every record and releases the node storage.
    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
    }

    /// Height of the tree: 0 when empty, otherwise the number of nodes on the
    /// longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    fn subtree_height(&self, node: Option<NodeId>) -> usize {
        match node {
            None => 0,
            Some(id) => {
                let node = &self.arena[id];
                1 + self
                    .subtree_height(node.left)
                    .max(self.subtree_height(node.right))
            }
        }
    }

    /// Which side of `parent` the node `child` hangs on.
    #[inline]
    pub(crate) fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        let parent = &self.arena[parent];
        if parent.left == Some(child) {
            Side::Left
        } else {
            debug_assert_eq!(parent.right, Some(child));
            Side::Right
        }
    }

    /// Points the link that referred to `old` (a child link of `parent`, or
    /// the root) at `new`, and updates the parent link of `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            Some(p) => {
                let side = self.side_of(p, old);
                self.arena[p].set_child(side, new);
            }
            None => self.root = new,
        }
        if let Some(new) = new {
            self.arena[new].parent = parent;
        }
    }

    /// Lifts the `heavy` child of `x` into the place of `x`, which becomes
    /// that child's subtree on the opposite side. In-order sequence is
    /// preserved. Balance indicators are left to the caller.
    fn rotate(&mut self, x: NodeId, heavy: Side) -> NodeId {
        let light = heavy.opposite();
        let Some(y) = self.arena[x].child(heavy) else {
            debug_assert!(false, "rotation of {x:?} without a {heavy:?} child");
            return x;
        };
        let inner = self.arena[y].child(light);
        let parent = self.arena[x].parent;

        self.arena[x].set_child(heavy, inner);
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(x);
        }
        self.replace_child(parent, x, Some(y));
        self.arena[y].set_child(light, Some(x));
        self.arena[x].parent = Some(y);
        y
    }

    /// Restores balance at `x`, whose `heavy` subtree is two levels taller
    /// than the other one (the stored indicator still says one).
    ///
    /// Returns the new root of the subtree and whether the subtree ended up
    /// one level shorter than it was while doubly imbalanced. After an
    /// insertion that is always the case; after a deletion a single rotation
    /// over an evenly balanced child leaves the height unchanged.
    fn rebalance(&mut self, x: NodeId, heavy: Side) -> (NodeId, bool) {
        let light = heavy.opposite();
        let Some(z) = self.arena[x].child(heavy) else {
            debug_assert!(false, "{x:?} is {heavy:?} heavy without a {heavy:?} child");
            return (x, false);
        };
        let z_balance = self.arena[z].balance;

        if z_balance == Balance::leaning(light) {
            // Heavy child leans the other way: double rotation.
            let Some(w) = self.arena[z].child(light) else {
                debug_assert!(false, "{z:?} is {light:?} heavy without a {light:?} child");
                return (x, false);
            };
            let w_balance = self.arena[w].balance;
            self.rotate(z, light);
            self.rotate(x, heavy);

            let (x_balance, z_balance) = if w_balance == Balance::leaning(heavy) {
                (Balance::leaning(light), Balance::Equal)
            } else if w_balance == Balance::leaning(light) {
                (Balance::Equal, Balance::leaning(heavy))
            } else {
                (Balance::Equal, Balance::Equal)
            };
            self.arena[x].balance = x_balance;
            self.arena[z].balance = z_balance;
            self.arena[w].balance = Balance::Equal;
            (w, true)
        } else {
            self.rotate(x, heavy);
            if z_balance == Balance::Equal {
                self.arena[x].balance = Balance::leaning(heavy);
                self.arena[z].balance = Balance::leaning(light);
                (z, false)
            } else {
                self.arena[x].balance = Balance::Equal;
                self.arena[z].balance = Balance::Equal;
                (z, true)
            }
        }
    }

    /// Walks up from a freshly attached leaf. Stops at the first subtree
    /// whose height did not change, or after one rotation.
    fn rebalance_after_insert(&mut self, mut child: NodeId) {
        while let Some(x) = self.arena[child].parent {
            let side = self.side_of(x, child);
            let balance = self.arena[x].balance;
            if balance == Balance::Equal {
                self.arena[x].balance = Balance::leaning(side);
                child = x;
            } else if balance == Balance::leaning(side) {
                self.rebalance(x, side);
                return;
            } else {
                self.arena[x].balance = Balance::Equal;
                return;
            }
        }
    }

    /// Walks up from `x`, whose `shorter` subtree just lost one level.
    /// Continues only while the subtree height keeps decreasing.
    fn rebalance_after_delete(&mut self, mut x: NodeId, mut shorter: Side) {
        loop {
            let balance = self.arena[x].balance;
            let subtree = if balance == Balance::Equal {
                self.arena[x].balance = Balance::leaning(shorter.opposite());
                return;
            } else if balance == Balance::leaning(shorter) {
                self.arena[x].balance = Balance::Equal;
                x
            } else {
                let (root, shrunk) = self.rebalance(x, shorter.opposite());
                if !shrunk {
                    return;
                }
                root
            };

            let Some(parent) = self.arena[subtree].parent else {
                return;
            };
            shorter = self.side_of(parent, subtree);
            x = parent;
        }
    }

    /// Detaches `t`, which has at most one child, from the tree and
    /// rebalances. The slot of `t` is still occupied afterwards.
    fn unlink(&mut self, t: NodeId) {
        let node = &self.arena[t];
        debug_assert!(node.left.is_none() || node.right.is_none());
        let child = node.left.or(node.right);
        let parent = node.parent;
        let side = parent.map(|p| self.side_of(p, t));

        self.replace_child(parent, t, child);
        if let (Some(parent), Some(side)) = (parent, side) {
            self.rebalance_after_delete(parent, side);
        }
    }

    fn validate_subtree(&self, node: Option<NodeId>, count: &mut usize) -> Result<usize> {
        let Some(id) = node else {
            return Ok(0);
        };
        *count += 1;
        let node = &self.arena[id];
        for child in [node.left, node.right].into_iter().flatten() {
            if self.arena[child].parent != Some(id) {
                return Err(Error::invariant_violation(format!(
                    "{child:?} does not point back at its parent {id:?}"
                )));
            }
        }

        let left = self.validate_subtree(node.left, count)?;
        let right = self.validate_subtree(node.right, count)?;
        let diff = right as isize - left as isize;
        if diff.abs() > 1 {
            return Err(Error::invariant_violation(format!(
                "{id:?} is out of balance: left height {left}, right height {right}"
            )));
        }
        if node.balance.as_i8() as isize != diff {
            return Err(Error::invariant_violation(format!(
                "{id:?} records {:?} but the height difference is {diff}",
                node.balance
            )));
        }
        Ok(1 + left.max(right))
    }
}

impl<R: Record> OrderedIndex<R> {
    pub(crate) fn locate(&self, key: &R::Key) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.arena[id];
            cursor = match R::compare(key, &node.record) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Returns the record stored under `key`, if any.
    pub fn find(&self, key: &R::Key) -> Option<&R> {
        self.locate(key).map(|id| &self.arena[id].record)
    }

    /// Returns a mutable reference to the record stored under `key`, if any.
    ///
    /// The caller must not change the record in a way that alters its
    /// position under [`Record::compare`].
    pub fn find_mut(&mut self, key: &R::Key) -> Option<&mut R> {
        self.locate(key).map(|id| &mut self.arena[id].record)
    }

    /// Returns `true` if a record is stored under `key`.
    pub fn contains(&self, key: &R::Key) -> bool {
        self.locate(key).is_some()
    }

    /// Finds or creates the record for `key`.
    ///
    /// Returns the record and `true` if it was created by this call. An
    /// existing record is returned with `false` and the tree is left
    /// untouched. A new record is built with [`Record::construct`] only after
    /// its node storage has been secured.
    ///
    /// The caller must not change the returned record in a way that alters
    /// its position under [`Record::compare`].
    ///
    /// # Errors
    ///
    /// Fails with an allocation error if node storage cannot be obtained.
    pub fn insert(&mut self, key: &R::Key) -> Result<(&mut R, bool)> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut existing = None;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            side = match R::compare(key, &self.arena[id].record) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    existing = Some(id);
                    break;
                }
            };
            parent = Some(id);
            cursor = self.arena[id].child(side);
        }
        if let Some(id) = existing {
            return Ok((&mut self.arena[id].record, false));
        }

        self.arena.reserve_one()?;
        let id = self.arena.insert(Node::leaf(parent, R::construct(key)));
        match parent {
            Some(parent) => {
                self.arena[parent].set_child(side, Some(id));
                self.rebalance_after_insert(id);
            }
            None => self.root = Some(id),
        }
        Ok((&mut self.arena[id].record, true))
    }

    /// Removes and destroys the record stored under `key`.
    ///
    /// Returns `false` if there was no such record. A node with two children
    /// takes over the record of its in-order predecessor (through
    /// [`Record::assign`]) and the predecessor's node is removed instead.
    pub fn delete(&mut self, key: &R::Key) -> bool {
        let Some(target) = self.locate(key) else {
            return false;
        };
        let node = &self.arena[target];
        match (node.left, node.right) {
            (Some(left), Some(_)) => {
                let predecessor = self.rightmost(left);
                self.unlink(predecessor);
                let predecessor = self.arena.remove(predecessor);
                self.arena[target].record.assign(predecessor.record);
            }
            _ => {
                self.unlink(target);
                drop(self.arena.remove(target));
            }
        }
        true
    }

    /// Checks every structural invariant of the tree: parent links, the AVL
    /// height condition, the balance indicators, the record count and the
    /// strict ascending order of records.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation describing the first defect found.
    pub fn validate(&self) -> Result<()> {
        if let Some(root) = self.root {
            verify_invariant!(self.arena[root].parent.is_none());
        }
        let mut count = 0;
        self.validate_subtree(self.root, &mut count)?;
        if count != self.len() {
            return Err(Error::invariant_violation(format!(
                "{count} reachable nodes but {} live records",
                self.len()
            )));
        }

        let mut previous: Option<&R> = None;
        for record in self.iter() {
            if let Some(previous) = previous {
                verify_invariant!(R::compare(previous.key(), record) == Ordering::Less);
            }
            previous = Some(record);
        }
        Ok(())
    }
}

impl<R> Default for OrderedIndex<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: fmt::Debug> fmt::Debug for OrderedIndex<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
