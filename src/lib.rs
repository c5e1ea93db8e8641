//! # lexicon
//!
//! An arena-backed red-black tree ordered map and a word-frequency
//! dictionary built on it.
//!
//! ## Overview
//!
//! - **Ordered map**: [`OrderedMap`](tree::OrderedMap) keeps unique keys in
//!   ascending order with O(log N) insert, lookup and removal. In-order,
//!   level-order and diagram views expose the node colors.
//! - **Dictionary**: [`WordDictionary`](dictionary::WordDictionary) counts
//!   case-folded words read from text.
//!
//! ## Feature Flags
//!
//! - `tree`: The red-black tree ordered map
//! - `dictionary`: The word-frequency dictionary (implies `tree`)
//! - `serde`: Serialization support for the ordered map
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lexicon::prelude::*;
//!
//! let mut map = OrderedMap::new();
//! map.insert("delta".to_string(), 4);
//! map.insert("alpha".to_string(), 1);
//! assert_eq!(map.get("alpha"), Some(&1));
//!
//! let mut dictionary = WordDictionary::new();
//! dictionary.add_word("Alpha");
//! assert_eq!(dictionary.find_word("ALPHA"), Some(1));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use lexicon::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "tree")]
    pub use crate::tree::{Color, InvariantViolation, OrderedMap};

    #[cfg(feature = "dictionary")]
    pub use crate::dictionary::{DictionaryError, LoadMode, WordDictionary};
}

#[cfg(feature = "tree")]
pub mod tree;

#[cfg(feature = "dictionary")]
pub mod dictionary;
