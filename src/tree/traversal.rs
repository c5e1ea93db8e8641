//! Traversals over an [`OrderedMap`].
//!
//! All walks use an explicit stack instead of recursion. The stack starts
//! inline (no heap allocation) and only spills for trees taller than
//! [`INLINE_DEPTH`] levels, which a balanced tree reaches at around
//! sixteen million entries.

use std::collections::VecDeque;

use smallvec::SmallVec;

use super::arena::{Color, Link, NodeId};
use super::ordered_map::OrderedMap;

/// Stack slots kept inline before spilling to the heap.
pub(super) const INLINE_DEPTH: usize = 48;

type NodeStack = SmallVec<[NodeId; INLINE_DEPTH]>;

// =============================================================================
// In-order Iterator
// =============================================================================

/// In-order walk over the entries of an [`OrderedMap`].
///
/// Yields `(key, value, color)` in ascending key order. Created by
/// [`OrderedMap::traverse`].
pub struct InOrder<'a, K, V> {
    map: &'a OrderedMap<K, V>,
    stack: NodeStack,
    remaining: usize,
}

impl<'a, K, V> InOrder<'a, K, V> {
    fn new(map: &'a OrderedMap<K, V>) -> Self {
        let mut walk = Self {
            map,
            stack: SmallVec::new(),
            remaining: map.len(),
        };
        walk.push_left_spine(map.root);
        walk
    }

    fn push_left_spine(&mut self, mut link: Link) {
        let map = self.map;
        while let Some(id) = link {
            self.stack.push(id);
            link = map.arena[id].left;
        }
    }
}

impl<'a, K, V> Iterator for InOrder<'a, K, V> {
    type Item = (&'a K, &'a V, Color);

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        let id = self.stack.pop()?;
        let node = &map.arena[id];
        self.push_left_spine(node.right);
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value, node.color))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for InOrder<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

// =============================================================================
// Traversal Operations
// =============================================================================

impl<K, V> OrderedMap<K, V> {
    /// Returns an in-order walk yielding `(key, value, color)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lexicon::tree::{Color, OrderedMap};
    ///
    /// let map: OrderedMap<&str, i32> = [("a", 1), ("b", 1), ("c", 1)].into_iter().collect();
    /// let walked: Vec<(&&str, &i32, Color)> = map.traverse().collect();
    /// assert_eq!(walked[1], (&"b", &1, Color::Black));
    /// ```
    #[must_use]
    pub fn traverse(&self) -> InOrder<'_, K, V> {
        InOrder::new(self)
    }

    /// Returns every entry in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lexicon::tree::OrderedMap;
    ///
    /// let map: OrderedMap<&str, i32> = [("c", 3), ("a", 1), ("b", 2)].into_iter().collect();
    /// assert_eq!(map.dump(), vec![(&"a", &1), (&"b", &2), (&"c", &3)]);
    /// ```
    #[must_use]
    pub fn dump(&self) -> Vec<(&K, &V)> {
        self.traverse().map(|(key, value, _)| (key, value)).collect()
    }

    /// Groups the nodes by depth, root level first, left to right.
    ///
    /// Meant for diagnostics; the structure is not touched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lexicon::tree::{Color, OrderedMap};
    ///
    /// let map: OrderedMap<&str, i32> = [("a", 1), ("b", 1), ("c", 1)].into_iter().collect();
    /// let levels = map.levels();
    /// assert_eq!(levels.len(), 2);
    /// assert_eq!(levels[0], vec![(&"b", &1, Color::Black)]);
    /// assert_eq!(levels[1], vec![(&"a", &1, Color::Red), (&"c", &1, Color::Red)]);
    /// ```
    #[must_use]
    pub fn levels(&self) -> Vec<Vec<(&K, &V, Color)>> {
        let mut levels = Vec::new();
        let mut queue: VecDeque<(NodeId, usize)> = self.root.map(|id| (id, 0)).into_iter().collect();

        while let Some((id, depth)) = queue.pop_front() {
            let node = &self.arena[id];
            if levels.len() == depth {
                levels.push(Vec::new());
            }
            levels[depth].push((&node.key, &node.value, node.color));
            queue.extend(
                [node.left, node.right]
                    .into_iter()
                    .flatten()
                    .map(|child| (child, depth + 1)),
            );
        }

        levels
    }

    /// Returns the number of levels, 0 for an empty map.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: SmallVec<[(NodeId, usize); INLINE_DEPTH]> =
            self.root.map(|id| (id, 1)).into_iter().collect();

        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.arena[id];
            stack.extend(
                [node.left, node.right]
                    .into_iter()
                    .flatten()
                    .map(|child| (child, depth + 1)),
            );
        }

        deepest
    }
}

// =============================================================================
// Tests
// =============================================================================
