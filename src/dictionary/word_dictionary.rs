//! Word-frequency dictionary over an [`OrderedMap`].

use std::convert::Infallible;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use super::error::DictionaryError;
use super::text::{normalize_word, tokenize};
use crate::tree::OrderedMap;

/// What a load does with words already in the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Drop existing words before adding the loaded ones.
    #[default]
    Replace,
    /// Add the loaded words on top of the existing counts.
    Append,
}

/// Counts normalized words.
///
/// Every word is passed through [`normalize_word`] before it reaches the
/// underlying [`OrderedMap`], so lookups are insensitive to Latin and
/// Cyrillic letter case. Empty input is ignored by every operation.
///
/// # Examples
///
/// ```rust
/// use lexicon::dictionary::WordDictionary;
///
/// let mut dictionary = WordDictionary::new();
/// dictionary.add_word("Мир");
/// dictionary.add_word("мир");
/// dictionary.add_word("peace");
///
/// assert_eq!(dictionary.find_word("МИР"), Some(2));
/// assert_eq!(dictionary.entries(), vec![("peace", 1), ("мир", 2)]);
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct WordDictionary {
    words: OrderedMap<String, u64>,
}

impl WordDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: OrderedMap::new(),
        }
    }

    /// Number of distinct normalized words.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if no word has been added.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The underlying map, for display and diagnostics.
    #[must_use]
    pub const fn words(&self) -> &OrderedMap<String, u64> {
        &self.words
    }

    /// Counts one occurrence of `raw` and returns the new count.
    ///
    /// Returns `None` for empty input.
    pub fn add_word(&mut self, raw: &str) -> Option<u64> {
        if raw.is_empty() {
            return None;
        }
        let Ok(count) = self.count_word(raw, |words, key| {
            words.insert(key, 1);
            Ok::<(), Infallible>(())
        });
        Some(count)
    }

    /// Bumps the counter of `raw`, creating it through `create` when the
    /// word is new.
    fn count_word<E>(
        &mut self,
        raw: &str,
        create: impl FnOnce(&mut OrderedMap<String, u64>, String) -> Result<(), E>,
    ) -> Result<u64, E> {
        let key = normalize_word(raw);
        let count = match self.words.get_mut(key.as_str()) {
            Some(count) => {
                *count = count.saturating_add(1);
                *count
            }
            None => {
                create(&mut self.words, key.clone())?;
                1
            }
        };
        debug!(word = raw, key = %key, count, "word added");
        Ok(count)
    }

    /// Removes `raw` entirely, whatever its count. Returns whether it was
    /// present.
    pub fn remove_word(&mut self, raw: &str) -> bool {
        if raw.is_empty() {
            return false;
        }
        let key = normalize_word(raw);
        let removed = self.words.remove(key.as_str());
        debug!(word = raw, key = %key, removed, "word removed");
        removed
    }

    /// Returns the count of `raw`, or `None` if it was never added.
    #[must_use]
    pub fn find_word(&self, raw: &str) -> Option<u64> {
        if raw.is_empty() {
            return None;
        }
        let key = normalize_word(raw);
        let count = self.words.get(key.as_str()).copied();
        debug!(word = raw, key = %key, found = count.is_some(), "word looked up");
        count
    }

    /// Removes every word.
    pub fn clear(&mut self) {
        self.words.clear();
        info!("dictionary cleared");
    }

    /// Every word with its count, in ascending word order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, u64)> {
        self.words
            .dump()
            .into_iter()
            .map(|(word, count)| (word.as_str(), *count))
            .collect()
    }

    /// Reads `reader` to the end and adds every word in it.
    ///
    /// The whole source is read and decoded before the dictionary is
    /// touched, so a read or decoding error leaves it unchanged. Returns the
    /// number of words added, counting repeats.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Io`] if reading fails,
    /// [`DictionaryError::InvalidUtf8`] if the text is not UTF-8 and
    /// [`DictionaryError::Allocation`] if the dictionary cannot grow. After an
    /// allocation failure the words added so far stay in the dictionary.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lexicon::dictionary::{LoadMode, WordDictionary};
    ///
    /// let mut dictionary = WordDictionary::new();
    /// let added = dictionary
    ///     .load_from_reader("To be, or not to be.".as_bytes(), LoadMode::Replace)
    ///     .unwrap();
    /// assert_eq!(added, 6);
    /// assert_eq!(dictionary.find_word("be"), Some(2));
    /// ```
    pub fn load_from_reader<R: Read>(
        &mut self,
        mut reader: R,
        mode: LoadMode,
    ) -> Result<usize, DictionaryError> {
        let mut bytes = Vec::new();
        if let Err(source) = reader.read_to_end(&mut bytes) {
            warn!(error = %source, "failed to read dictionary source");
            return Err(DictionaryError::Io { path: None, source });
        }
        self.load_bytes(bytes, mode, None)
    }

    /// Reads the file at `path` and adds every word in it.
    ///
    /// Behaves like [`load_from_reader`](Self::load_from_reader).
    ///
    /// # Errors
    ///
    /// Same as [`load_from_reader`](Self::load_from_reader); I/O errors carry
    /// the path.
    pub fn load_from_path(
        &mut self,
        path: impl AsRef<Path>,
        mode: LoadMode,
    ) -> Result<usize, DictionaryError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| {
            warn!(path = %path.display(), error = %source, "failed to read dictionary file");
            DictionaryError::Io {
                path: Some(path.to_path_buf()),
                source,
            }
        })?;
        self.load_bytes(bytes, mode, Some(path))
    }

    fn load_bytes(
        &mut self,
        bytes: Vec<u8>,
        mode: LoadMode,
        path: Option<&Path>,
    ) -> Result<usize, DictionaryError> {
        let text = String::from_utf8(bytes).map_err(|error| {
            let valid_up_to = error.utf8_error().valid_up_to();
            warn!(?path, valid_up_to, "dictionary source is not valid UTF-8");
            DictionaryError::InvalidUtf8 { valid_up_to }
        })?;

        if mode == LoadMode::Replace {
            self.words.clear();
        }

        let mut added = 0;
        for word in tokenize(&text) {
            self.count_word(word, |words, key| words.try_insert(key, 1).map(drop))?;
            added += 1;
        }

        info!(
            ?path,
            ?mode,
            words = added,
            distinct = self.words.len(),
            "dictionary loaded"
        );
        Ok(added)
    }
}

impl fmt::Display for WordDictionary {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.words)
    }
}

impl fmt::Debug for WordDictionary {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("WordDictionary")
            .field("words", &self.words)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
