//! Structural self-check for [`OrderedMap`].

use std::fmt;

use smallvec::SmallVec;

use super::arena::{Color, NodeId};
use super::ordered_map::OrderedMap;
use super::traversal::INLINE_DEPTH;

// =============================================================================
// InvariantViolation
// =============================================================================

/// Describes the first broken red-black invariant found by
/// [`OrderedMap::validate`].
///
/// Depths count edges from the root, so the root is at depth 0.
///
/// # Examples
///
/// ```rust
/// use lexicon::tree::InvariantViolation;
///
/// let violation = InvariantViolation::ConsecutiveRed { depth: 3 };
/// assert_eq!(
///     format!("{violation}"),
///     "red node at depth 3 has a red child"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root is red.
    RedRoot,
    /// The root has a parent link.
    RootHasParent,
    /// The in-order walk is not strictly ascending at this position.
    OutOfOrder {
        /// Zero-based position in the in-order walk.
        position: usize,
    },
    /// A red node has a red child.
    ConsecutiveRed {
        /// Depth of the red parent.
        depth: usize,
    },
    /// Two paths down to a missing child cross different black counts.
    UnevenBlackHeight {
        /// Black count of the first path seen.
        expected: usize,
        /// Black count of the offending path.
        found: usize,
    },
    /// A child does not point back at its parent.
    BrokenParentLink {
        /// Depth of the child.
        depth: usize,
    },
    /// The stored entry count differs from the number of reachable nodes.
    LengthMismatch {
        /// Count kept by the map.
        recorded: usize,
        /// Nodes reachable from the root.
        counted: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedRoot => write!(formatter, "root is red"),
            Self::RootHasParent => write!(formatter, "root has a parent link"),
            Self::OutOfOrder { position } => {
                write!(formatter, "keys out of order at in-order position {position}")
            }
            Self::ConsecutiveRed { depth } => {
                write!(formatter, "red node at depth {depth} has a red child")
            }
            Self::UnevenBlackHeight { expected, found } => write!(
                formatter,
                "black height {found} differs from {expected} on another path"
            ),
            Self::BrokenParentLink { depth } => {
                write!(formatter, "node at depth {depth} does not link back to its parent")
            }
            Self::LengthMismatch { recorded, counted } => write!(
                formatter,
                "map records {recorded} entries but {counted} nodes are reachable"
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

// =============================================================================
// Validation
// =============================================================================

impl<K: Ord, V> OrderedMap<K, V> {
    /// Checks every red-black invariant and returns the black height.
    ///
    /// The black height counts black nodes on any path from the root down
    /// to a missing child, so an empty map has black height 0.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lexicon::tree::OrderedMap;
    ///
    /// let map: OrderedMap<u32, u32> = (0..8).map(|key| (key, key)).collect();
    /// assert!(map.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        let Some(root) = self.root else {
            return self.check_length(0).map(|()| 0);
        };

        if self.arena[root].parent.is_some() {
            return Err(InvariantViolation::RootHasParent);
        }
        if self.arena[root].color.is_red() {
            return Err(InvariantViolation::RedRoot);
        }

        let black_height = self.check_shape(root)?;
        self.check_order()?;
        Ok(black_height)
    }

    fn check_length(&self, counted: usize) -> Result<(), InvariantViolation> {
        if counted == self.length {
            Ok(())
        } else {
            Err(InvariantViolation::LengthMismatch {
                recorded: self.length,
                counted,
            })
        }
    }

    /// Walks every node once checking colors, parent links and black counts.
    fn check_shape(&self, root: NodeId) -> Result<usize, InvariantViolation> {
        let mut stack: SmallVec<[(NodeId, usize, usize); INLINE_DEPTH]> = SmallVec::new();
        stack.push((root, 0, usize::from(self.arena[root].color.is_black())));

        let mut black_height: Option<usize> = None;
        let mut counted = 0;

        while let Some((id, depth, blacks)) = stack.pop() {
            counted += 1;
            let node = &self.arena[id];

            for child in [node.left, node.right] {
                let Some(child_id) = child else {
                    match black_height {
                        None => black_height = Some(blacks),
                        Some(expected) if expected != blacks => {
                            return Err(InvariantViolation::UnevenBlackHeight {
                                expected,
                                found: blacks,
                            });
                        }
                        Some(_) => {}
                    }
                    continue;
                };

                let child_node = &self.arena[child_id];
                if child_node.parent != Some(id) {
                    return Err(InvariantViolation::BrokenParentLink { depth: depth + 1 });
                }
                if node.color.is_red() && child_node.color.is_red() {
                    return Err(InvariantViolation::ConsecutiveRed { depth });
                }
                let child_blacks = blacks + usize::from(child_node.color == Color::Black);
                stack.push((child_id, depth + 1, child_blacks));
            }
        }

        self.check_length(counted)?;
        Ok(black_height.unwrap_or_default())
    }

    fn check_order(&self) -> Result<(), InvariantViolation> {
        let mut previous: Option<&K> = None;
        for (position, (key, _, _)) in self.traverse().enumerate() {
            if previous.is_some_and(|previous| previous >= key) {
                return Err(InvariantViolation::OutOfOrder { position });
            }
            previous = Some(key);
        }
        Ok(())
    }

    /// Recolors a node behind the tree's back so tests can observe
    /// [`validate`](Self::validate) failing.
    #[cfg(test)]
    pub(super) fn force_color(&mut self, key: &K, color: Color) {
        let mut link = self.root;
        while let Some(id) = link {
            match key.cmp(&self.arena[id].key) {
                std::cmp::Ordering::Less => link = self.arena[id].left,
                std::cmp::Ordering::Greater => link = self.arena[id].right,
                std::cmp::Ordering::Equal => {
                    self.arena[id].color = color;
                    return;
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
