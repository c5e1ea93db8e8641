//! Red-black tree ordered map.
//!
//! This module provides [`OrderedMap`], a mutable ordered key-value store
//! that keeps itself balanced with the red-black coloring scheme:
//!
//! - O(log N) insert, get and remove
//! - O(N) clear, dump and traversals, all without recursion
//! - O(1) len and `is_empty`
//!
//! Nodes are stored in an arena and addressed by index. Parent links are
//! plain indices used for fixups and never own anything.
//!
//! # Examples
//!
//! ```rust
//! use lexicon::tree::{Color, OrderedMap};
//!
//! let mut map = OrderedMap::new();
//! for key in ["a", "b", "c"] {
//!     map.insert(key.to_string(), 1);
//! }
//!
//! assert_eq!(map.dump(), vec![(&"a".to_string(), &1), (&"b".to_string(), &1), (&"c".to_string(), &1)]);
//! assert_eq!(map.levels()[0][0].2, Color::Black);
//! assert!(map.validate().is_ok());
//!
//! // Upsert keeps a single node
//! map.insert("b".to_string(), 5);
//! assert_eq!(map.len(), 3);
//! assert_eq!(map.get("b"), Some(&5));
//! ```

mod arena;
mod ordered_map;
mod render;
mod traversal;
mod validate;

pub use arena::Color;
pub use ordered_map::OrderedMap;
pub use render::{DEFAULT_INDENT, Diagram};
pub use traversal::InOrder;
pub use validate::InvariantViolation;
