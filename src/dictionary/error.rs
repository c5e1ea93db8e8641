//! Error types for dictionary loading.

use std::collections::TryReserveError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Represents errors that can occur while filling a
/// [`WordDictionary`](super::WordDictionary) from a text source.
///
/// # Examples
///
/// ```rust
/// use lexicon::dictionary::{DictionaryError, LoadMode, WordDictionary};
///
/// let mut dictionary = WordDictionary::new();
/// let error = dictionary
///     .load_from_path("/definitely/not/here.txt", LoadMode::Replace)
///     .unwrap_err();
/// assert!(matches!(error, DictionaryError::Io { .. }));
/// ```
#[derive(Debug)]
pub enum DictionaryError {
    /// The source could not be read.
    Io {
        /// File being read, when the source was a path.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The source is not valid UTF-8.
    InvalidUtf8 {
        /// Length of the valid prefix in bytes.
        valid_up_to: usize,
    },
    /// The dictionary could not grow to hold another word.
    Allocation(TryReserveError),
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                path: Some(path),
                source,
            } => write!(formatter, "failed to read {}: {source}", path.display()),
            Self::Io { path: None, source } => write!(formatter, "failed to read source: {source}"),
            Self::InvalidUtf8 { valid_up_to } => write!(
                formatter,
                "source is not valid UTF-8 after byte {valid_up_to}"
            ),
            Self::Allocation(error) => write!(formatter, "out of memory: {error}"),
        }
    }
}

impl std::error::Error for DictionaryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidUtf8 { .. } => None,
            Self::Allocation(error) => Some(error),
        }
    }
}

impl From<TryReserveError> for DictionaryError {
    fn from(error: TryReserveError) -> Self {
        Self::Allocation(error)
    }
}
