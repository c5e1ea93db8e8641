//! Index-addressed node storage for [`OrderedMap`](super::OrderedMap).
//!
//! Nodes live in a `Vec` of slots and refer to each other through
//! [`NodeId`] indices. A missing child or parent is `None`, which takes the
//! place of a shared sentinel node: it is black when asked for its color and
//! never carries a key.
//!
//! Removed nodes leave a vacant slot behind. Vacant slots form an intrusive
//! free list, so removing never allocates and the next insert reuses the
//! slot.

use std::collections::TryReserveError;
use std::mem;
use std::ops::{Index, IndexMut};

// =============================================================================
// Color Definition
// =============================================================================

/// The color of a red-black tree node.
///
/// Callers observe colors through traversals; only the tree itself
/// assigns them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    /// A red node. Never the root and never the parent of another red node.
    Red,
    /// A black node. Absent children count as black.
    Black,
}

impl Color {
    /// Returns `true` if the color is [`Color::Red`].
    #[inline]
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Red)
    }

    /// Returns `true` if the color is [`Color::Black`].
    #[inline]
    #[must_use]
    pub const fn is_black(self) -> bool {
        matches!(self, Self::Black)
    }

    /// Single-letter tag used by the textual renderings.
    pub(super) const fn tag(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Black => 'B',
        }
    }
}

// =============================================================================
// Links
// =============================================================================

/// Index of a live node inside an [`Arena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(super) struct NodeId(usize);

impl NodeId {
    #[inline]
    const fn index(self) -> usize {
        self.0
    }
}

/// A child or parent reference. `None` stands for the sentinel.
pub(super) type Link = Option<NodeId>;

/// Which child of a node a link occupies.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub(super) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

// =============================================================================
// Node Definition
// =============================================================================

#[derive(Clone)]
pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) color: Color,
    pub(super) parent: Link,
    pub(super) left: Link,
    pub(super) right: Link,
}

impl<K, V> Node<K, V> {
    /// Creates a new red leaf hanging under `parent`.
    pub(super) const fn new_red(key: K, value: V, parent: Link) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(super) const fn child(&self, direction: Direction) -> Link {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    #[inline]
    pub(super) const fn set_child(&mut self, direction: Direction, child: Link) {
        match direction {
            Direction::Left => self.left = child,
            Direction::Right => self.right = child,
        }
    }
}

// =============================================================================
// Arena
// =============================================================================

#[derive(Clone)]
enum Slot<K, V> {
    Occupied(Node<K, V>),
    Vacant { next_free: Link },
}

/// Owner of every node of one tree.
#[derive(Clone)]
pub(super) struct Arena<K, V> {
    slots: Vec<Slot<K, V>>,
    free_head: Link,
}

impl<K, V> Arena<K, V> {
    pub(super) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
        }
    }

    /// Makes sure the next [`allocate`](Self::allocate) cannot fail.
    ///
    /// Touches nothing but spare capacity, so the tree stays exactly as it
    /// was when this returns an error.
    pub(super) fn try_reserve(&mut self) -> Result<(), TryReserveError> {
        if self.free_head.is_none() {
            self.slots.try_reserve(1)?;
        }
        Ok(())
    }

    /// Stores `node` in a free slot, reusing vacated slots first.
    pub(super) fn allocate(&mut self, node: Node<K, V>) -> NodeId {
        match self.free_head {
            Some(id) => {
                let slot = mem::replace(&mut self.slots[id.index()], Slot::Occupied(node));
                self.free_head = match slot {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free list points at live node {id:?}"),
                };
                id
            }
            None => {
                let id = NodeId(self.slots.len());
                self.slots.push(Slot::Occupied(node));
                id
            }
        }
    }

    /// Takes the node out of its slot and puts the slot on the free list.
    pub(super) fn release(&mut self, id: NodeId) -> Node<K, V> {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match mem::replace(&mut self.slots[id.index()], vacant) {
            Slot::Occupied(node) => {
                self.free_head = Some(id);
                node
            }
            Slot::Vacant { .. } => unreachable!("released vacant slot {id:?}"),
        }
    }

    /// Drops every node. Nodes do not own each other, so this never recurses.
    pub(super) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
    }

    /// Number of slots, live or vacant.
    #[cfg(test)]
    pub(super) fn capacity_in_use(&self) -> usize {
        self.slots.len()
    }
}

impl<K, V> Index<NodeId> for Arena<K, V> {
    type Output = Node<K, V>;

    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        match &self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link to vacant slot {id:?}"),
        }
    }
}

impl<K, V> IndexMut<NodeId> for Arena<K, V> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match &mut self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link to vacant slot {id:?}"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
