//! Node storage for the ordered index.
//!
//! Nodes live in a single `Vec` of slots and refer to each other through
//! [`NodeId`] handles. A vacant slot is linked into a free list and reused by
//! the next allocation, so the arena never shrinks while the index is alive.

use sift_common::{Result, error::Error};

/// Handle of a node inside a [`NodeArena`].
///
/// `u32::MAX` is never handed out, which keeps `Option<NodeId>` trivially
/// distinguishable from any live handle when debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) const MAX_NODES: usize = (u32::MAX - 1) as usize;

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which subtree of a node is taller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Balance {
    /// Both subtrees have the same height.
    #[default]
    Equal,
    /// The left subtree is one level taller.
    LeftHigh,
    /// The right subtree is one level taller.
    RightHigh,
}

impl Balance {
    /// Balance of a node whose `side` subtree is one level taller.
    #[inline]
    pub fn leaning(side: Side) -> Balance {
        match side {
            Side::Left => Balance::LeftHigh,
            Side::Right => Balance::RightHigh,
        }
    }

    /// Sign of `height(right) - height(left)`.
    pub fn as_i8(self) -> i8 {
        match self {
            Balance::Equal => 0,
            Balance::LeftHigh => -1,
            Balance::RightHigh => 1,
        }
    }
}

/// Child position relative to a parent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A tree node: owned links to its subtrees, a navigational parent link and
/// the caller's record.
#[derive(Debug)]
pub(crate) struct Node<R> {
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) balance: Balance,
    pub(crate) record: R,
}

impl<R> Node<R> {
    pub(crate) fn leaf(parent: Option<NodeId>, record: R) -> Node<R> {
        Node {
            parent,
            left: None,
            right: None,
            balance: Balance::Equal,
            record,
        }
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

#[derive(Debug)]
enum Slot<R> {
    Occupied(Node<R>),
    Vacant { next_free: Option<NodeId> },
}

#[derive(Debug)]
pub(crate) struct NodeArena<R> {
    slots: Vec<Slot<R>>,
    free_head: Option<NodeId>,
    live: usize,
    node_limit: usize,
}

impl<R> NodeArena<R> {
    pub(crate) fn new(node_limit: usize) -> NodeArena<R> {
        NodeArena {
            slots: Vec::new(),
            free_head: None,
            live: 0,
            node_limit: node_limit.min(NodeId::MAX_NODES),
        }
    }

    pub(crate) fn with_capacity(capacity: usize, node_limit: usize) -> NodeArena<R> {
        let node_limit = node_limit.min(NodeId::MAX_NODES);
        NodeArena {
            slots: Vec::with_capacity(capacity.min(node_limit)),
            free_head: None,
            live: 0,
            node_limit,
        }
    }

    /// Number of occupied slots.
    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    /// Makes sure the next call to [`NodeArena::insert`] will not need to
    /// allocate, so that a record is only constructed once its node is
    /// guaranteed to exist.
    pub(crate) fn reserve_one(&mut self) -> Result<()> {
        if self.free_head.is_some() {
            return Ok(());
        }
        if self.live >= self.node_limit {
            log::warn!("node limit of {} reached", self.node_limit);
            return Err(Error::allocation_failed(1));
        }
        self.slots.try_reserve(1).inspect_err(|e| {
            log::warn!("failed to grow node arena past {} slots: {e}", self.slots.len());
        })?;
        Ok(())
    }

    /// Places `node` into a vacant slot. [`NodeArena::reserve_one`] must have
    /// succeeded beforehand.
    pub(crate) fn insert(&mut self, node: Node<R>) -> NodeId {
        self.live += 1;
        match self.free_head {
            Some(id) => {
                let slot = &mut self.slots[id.index()];
                let Slot::Vacant { next_free } = *slot else {
                    unreachable!("free list points at occupied slot {id:?}");
                };
                self.free_head = next_free;
                *slot = Slot::Occupied(node);
                id
            }
            None => {
                let id = NodeId(self.slots.len() as u32);
                self.slots.push(Slot::Occupied(node));
                id
            }
        }
    }

    /// Vacates the slot of `id` and hands back its node.
    pub(crate) fn remove(&mut self, id: NodeId) -> Node<R> {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match std::mem::replace(&mut self.slots[id.index()], vacant) {
            Slot::Occupied(node) => {
                self.free_head = Some(id);
                self.live -= 1;
                node
            }
            Slot::Vacant { .. } => unreachable!("double free of node {id:?}"),
        }
    }

    /// Drops every node. Records are dropped in slot order.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.live = 0;
    }
}

impl<R> std::ops::Index<NodeId> for NodeArena<R> {
    type Output = Node<R>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<R> {
        match &self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("dangling node handle {id:?}"),
        }
    }
}

impl<R> std::ops::IndexMut<NodeId> for NodeArena<R> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<R> {
        match &mut self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("dangling node handle {id:?}"),
        }
    }
}
