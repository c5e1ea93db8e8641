//! Mutable ordered map based on a red-black tree.
//!
//! [`OrderedMap`] keeps its nodes in an index-addressed arena (see
//! [`arena`](super::arena)) and restores the red-black invariants after
//! every insert and remove with the classical fixup passes:
//!
//! 1. Keys are in strict ascending order along an in-order walk
//! 2. The root is black
//! 3. A red node never has a red child
//! 4. Every path from a node down to a missing child crosses the same
//!    number of black nodes
//!
//! These invariants bound the height by `2 * log2(n + 1)`.
//!
//! # Examples
//!
//! ```rust
//! use lexicon::tree::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert("beta".to_string(), 2);
//! map.insert("alpha".to_string(), 1);
//!
//! assert_eq!(map.get("alpha"), Some(&1));
//! assert_eq!(map.dump(), vec![(&"alpha".to_string(), &1), (&"beta".to_string(), &2)]);
//!
//! assert!(map.remove("alpha"));
//! assert!(!map.remove("alpha"));
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::TryReserveError;
use std::iter::FromIterator;
use std::mem;

use super::arena::{Arena, Color, Direction, Link, Node, NodeId};

// =============================================================================
// OrderedMap Definition
// =============================================================================

/// An ordered map backed by a red-black tree.
///
/// Keys must implement `Ord`. Every node is owned by the map's arena;
/// parent links are plain indices and never keep a node alive.
///
/// # Time Complexity
///
/// | Operation      | Complexity |
/// |----------------|------------|
/// | `new`          | O(1)       |
/// | `get`          | O(log N)   |
/// | `insert`       | O(log N)   |
/// | `remove`       | O(log N)   |
/// | `clear`        | O(N)       |
/// | `dump`         | O(N)       |
/// | `len`          | O(1)       |
///
/// # Examples
///
/// ```rust
/// use lexicon::tree::OrderedMap;
///
/// let mut counts: OrderedMap<String, u64> = OrderedMap::new();
/// for word in ["b", "a", "c", "a"] {
///     match counts.get_mut(word) {
///         Some(count) => *count += 1,
///         None => {
///             counts.insert(word.to_string(), 1);
///         }
///     }
/// }
///
/// let keys: Vec<&str> = counts.dump().into_iter().map(|(key, _)| key.as_str()).collect();
/// assert_eq!(keys, vec!["a", "b", "c"]);
/// assert_eq!(counts.get("a"), Some(&2));
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    pub(super) arena: Arena<K, V>,
    pub(super) root: Link,
    pub(super) length: usize,
}

/// Result of a key descent.
enum Location {
    Found(NodeId),
    /// The key belongs under `parent` (the root slot when `None`) on `direction`.
    Vacant { parent: Link, direction: Direction },
}

impl<K, V> OrderedMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lexicon::tree::OrderedMap;
    ///
    /// let map: OrderedMap<String, u64> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            length: 0,
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Removes every entry.
    ///
    /// Calling this on an empty map does nothing. Nodes are dropped slot by
    /// slot, so arbitrarily large maps are torn down without recursion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lexicon::tree::OrderedMap;
    ///
    /// let mut map: OrderedMap<String, u64> = ["a", "b"].into_iter().map(|key| (key.to_string(), 1)).collect();
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.get("a"), None);
    /// map.clear();
    /// assert!(map.dump().is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.length = 0;
    }

    /// Color of a link; the missing child counts as black.
    #[inline]
    fn color_of(&self, link: Link) -> Color {
        link.map_or(Color::Black, |id| self.arena[id].color)
    }

    #[inline]
    fn set_color(&mut self, link: Link, color: Color) {
        if let Some(id) = link {
            self.arena[id].color = color;
        }
    }

    /// Which side of `parent` holds `child`.
    #[inline]
    fn direction_of(&self, child: Link, parent: NodeId) -> Direction {
        if self.arena[parent].left == child {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Points whatever referenced `old` (a child slot of `parent` or the
    /// root) at `new`.
    fn replace_child(&mut self, parent: Link, old: NodeId, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.direction_of(Some(old), parent);
                self.arena[parent].set_child(side, new);
            }
        }
    }

    /// Rotates the subtree rooted at `pivot` towards `direction`.
    ///
    /// `Direction::Left` is the classical left rotation: the right child of
    /// `pivot` takes its place and `pivot` becomes that child's left child.
    /// The in-order sequence of the subtree is unchanged.
    fn rotate(&mut self, pivot: NodeId, direction: Direction) {
        let opposite = direction.opposite();
        let Some(riser) = self.arena[pivot].child(opposite) else {
            return;
        };

        let inner = self.arena[riser].child(direction);
        self.arena[pivot].set_child(opposite, inner);
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(pivot);
        }

        let parent = self.arena[pivot].parent;
        self.arena[riser].parent = parent;
        self.replace_child(parent, pivot, Some(riser));

        self.arena[riser].set_child(direction, Some(pivot));
        self.arena[pivot].parent = Some(riser);
    }

    /// Puts `replacement` where `target` hangs. `target` keeps its own links.
    fn transplant(&mut self, target: NodeId, replacement: Link) {
        let parent = self.arena[target].parent;
        self.replace_child(parent, target, replacement);
        if let Some(replacement) = replacement {
            self.arena[replacement].parent = parent;
        }
    }

    fn minimum(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.arena[id].left {
            id = left;
        }
        id
    }

    /// Restores "no red node has a red child" after `current` was linked in
    /// as a red leaf.
    fn insert_fixup(&mut self, mut current: NodeId) {
        while let Some(parent) = self.arena[current].parent
            && self.arena[parent].color.is_red()
        {
            // A red parent is never the root, so the grandparent exists.
            let Some(grandparent) = self.arena[parent].parent else {
                break;
            };
            let side = self.direction_of(Some(parent), grandparent);
            let uncle = self.arena[grandparent].child(side.opposite());

            if self.color_of(uncle).is_red() {
                self.arena[parent].color = Color::Black;
                self.set_color(uncle, Color::Black);
                self.arena[grandparent].color = Color::Red;
                current = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.arena[parent].child(side.opposite()) == Some(current) {
                // Inner grandchild: straighten the zig-zag first.
                self.rotate(parent, side);
                current = parent;
                parent = match self.arena[current].parent {
                    Some(parent) => parent,
                    None => break,
                };
            }

            self.arena[parent].color = Color::Black;
            self.arena[grandparent].color = Color::Red;
            self.rotate(grandparent, side.opposite());
        }

        self.set_color(self.root, Color::Black);
    }

    /// Pays back the black unit lost when a black node was spliced out.
    ///
    /// `current` is the link that moved into the removed node's place and
    /// may be `None`; `parent` is tracked separately because a missing
    /// child has no parent link of its own.
    fn remove_fixup(&mut self, mut current: Link, mut parent: Link) {
        while current != self.root && self.color_of(current).is_black() {
            let Some(parent_id) = parent else {
                break;
            };
            let side = self.direction_of(current, parent_id);
            let far_side = side.opposite();

            // The sibling subtree carries at least one black node more than
            // `current`, so it cannot be empty.
            let Some(mut sibling) = self.arena[parent_id].child(far_side) else {
                break;
            };

            if self.arena[sibling].color.is_red() {
                self.arena[sibling].color = Color::Black;
                self.arena[parent_id].color = Color::Red;
                self.rotate(parent_id, side);
                sibling = match self.arena[parent_id].child(far_side) {
                    Some(sibling) => sibling,
                    None => break,
                };
            }

            let near = self.arena[sibling].child(side);
            let far = self.arena[sibling].child(far_side);

            if self.color_of(near).is_black() && self.color_of(far).is_black() {
                self.arena[sibling].color = Color::Red;
                current = Some(parent_id);
                parent = self.arena[parent_id].parent;
                continue;
            }

            if self.color_of(far).is_black() {
                self.set_color(near, Color::Black);
                self.arena[sibling].color = Color::Red;
                self.rotate(sibling, far_side);
                sibling = match self.arena[parent_id].child(far_side) {
                    Some(sibling) => sibling,
                    None => break,
                };
            }

            self.arena[sibling].color = self.arena[parent_id].color;
            self.arena[parent_id].color = Color::Black;
            let far = self.arena[sibling].child(far_side);
            self.set_color(far, Color::Black);
            self.rotate(parent_id, side);

            current = self.root;
            parent = None;
        }

        self.set_color(current, Color::Black);
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Descends from the root comparing `key` against each node.
    fn locate<Q>(&self, key: &Q) -> Location
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut parent = None;
        let mut direction = Direction::Left;
        let mut current = self.root;

        while let Some(id) = current {
            let node = &self.arena[id];
            direction = match key.cmp(node.key.borrow()) {
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
                Ordering::Equal => return Location::Found(id),
            };
            parent = Some(id);
            current = node.child(direction);
        }

        Location::Vacant { parent, direction }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lexicon::tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("hello".to_string(), 42);
    ///
    /// assert_eq!(map.get("hello"), Some(&42));
    /// assert_eq!(map.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.locate(key) {
            Location::Found(id) => Some(&self.arena[id].value),
            Location::Vacant { .. } => None,
        }
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// Changing the value never touches the tree structure or colors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lexicon::tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("word".to_string(), 1);
    /// if let Some(count) = map.get_mut("word") {
    ///     *count += 1;
    /// }
    /// assert_eq!(map.get("word"), Some(&2));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.locate(key) {
            Location::Found(id) => Some(&mut self.arena[id].value),
            Location::Vacant { .. } => None,
        }
    }

    /// Returns `true` if the map contains a value for the specified key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        matches!(self.locate(key), Location::Found(_))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key is already present its value is replaced in place and the
    /// old value is returned; the node keeps its color and position.
    /// Otherwise a red leaf is linked in and the tree is rebalanced.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lexicon::tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert("m".to_string(), 1), None);
    /// assert_eq!(map.insert("m".to_string(), 5), Some(1));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.locate(&key) {
            Location::Found(id) => Some(mem::replace(&mut self.arena[id].value, value)),
            Location::Vacant { parent, direction } => {
                self.attach(key, value, parent, direction);
                None
            }
        }
    }

    /// Inserts a key-value pair, reporting allocation failure instead of
    /// aborting.
    ///
    /// Storage for the new node is reserved before any link is changed, so
    /// on `Err` the map is exactly as it was before the call.
    ///
    /// # Errors
    ///
    /// Returns [`TryReserveError`] when the arena cannot grow.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lexicon::tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.try_insert("a".to_string(), 1), Ok(None));
    /// assert_eq!(map.try_insert("a".to_string(), 2), Ok(Some(1)));
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, TryReserveError> {
        match self.locate(&key) {
            Location::Found(id) => Ok(Some(mem::replace(&mut self.arena[id].value, value))),
            Location::Vacant { parent, direction } => {
                self.arena.try_reserve()?;
                self.attach(key, value, parent, direction);
                Ok(None)
            }
        }
    }

    fn attach(&mut self, key: K, value: V, parent: Link, direction: Direction) {
        let id = self.arena.allocate(Node::new_red(key, value, parent));
        match parent {
            None => self.root = Some(id),
            Some(parent) => self.arena[parent].set_child(direction, Some(id)),
        }
        self.length += 1;
        self.insert_fixup(id);
    }

    /// Removes a key from the map, returning whether it was present.
    ///
    /// An absent key leaves the map untouched.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lexicon::tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("a".to_string(), 1);
    /// assert!(map.remove("a"));
    /// assert!(!map.remove("a"));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).is_some()
    }

    /// Removes a key from the map, returning the stored key and value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lexicon::tree::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("a".to_string(), 1);
    /// assert_eq!(map.remove_entry("a"), Some(("a".to_string(), 1)));
    /// assert_eq!(map.remove_entry("a"), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Location::Found(target) = self.locate(key) else {
            return None;
        };

        let Node {
            left,
            right,
            color: target_color,
            parent: target_parent,
            ..
        } = self.arena[target];

        // `removed_color` is the color that physically left its position;
        // `replacement` moved into that position under `replacement_parent`.
        let (removed_color, replacement, replacement_parent) = match (left, right) {
            (None, _) => {
                self.transplant(target, right);
                (target_color, right, target_parent)
            }
            (Some(_), None) => {
                self.transplant(target, left);
                (target_color, left, target_parent)
            }
            (Some(left), Some(right)) => {
                let successor = self.minimum(right);
                let color = self.arena[successor].color;
                let replacement = self.arena[successor].right;

                let replacement_parent = if self.arena[successor].parent == Some(target) {
                    Some(successor)
                } else {
                    let parent = self.arena[successor].parent;
                    self.transplant(successor, replacement);
                    self.arena[successor].right = Some(right);
                    self.arena[right].parent = Some(successor);
                    parent
                };

                self.transplant(target, Some(successor));
                self.arena[successor].left = Some(left);
                self.arena[left].parent = Some(successor);
                self.arena[successor].color = target_color;

                (color, replacement, replacement_parent)
            }
        };

        let node = self.arena.release(target);
        self.length -= 1;

        if removed_color.is_black() {
            self.remove_fixup(replacement, replacement_parent);
        }

        Some((node.key, node.value))
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for OrderedMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self
                .traverse()
                .zip(other.traverse())
                .all(|((key, value, _), (other_key, other_value, _))| {
                    key == other_key && value == other_value
                })
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

static_assertions::assert_impl_all!(OrderedMap<String, u64>: Send, Sync, Clone, Default);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for OrderedMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value, _) in self.traverse() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct OrderedMapVisitor<K, V> {
    marker: std::marker::PhantomData<(K, V)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for OrderedMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = OrderedMap<K, V>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = OrderedMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for OrderedMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
