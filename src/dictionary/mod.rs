//! Word-frequency dictionary.
//!
//! This module counts words of Latin and Cyrillic text on top of
//! [`OrderedMap`](crate::tree::OrderedMap):
//!
//! - [`tokenize`] splits text on ASCII whitespace and punctuation
//! - [`normalize_word`] folds Latin and Cyrillic capitals to lower case
//! - [`WordDictionary`] keeps one counter per normalized word
//!
//! Operations emit `tracing` events. Nothing here installs a subscriber.
//!
//! # Examples
//!
//! ```rust
//! use lexicon::dictionary::{LoadMode, WordDictionary};
//!
//! let mut dictionary = WordDictionary::new();
//! dictionary
//!     .load_from_reader("Кот и кот. Cat and CAT!".as_bytes(), LoadMode::Replace)
//!     .unwrap();
//!
//! assert_eq!(dictionary.find_word("кот"), Some(2));
//! assert_eq!(dictionary.find_word("cat"), Some(2));
//! assert_eq!(dictionary.len(), 4);
//! ```

mod error;
mod text;
mod word_dictionary;

pub use error::DictionaryError;
pub use text::{normalize_word, tokenize};
pub use word_dictionary::{LoadMode, WordDictionary};
