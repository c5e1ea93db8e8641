#![cfg(feature = "dictionary")]
//! Integration tests for WordDictionary.

use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use lexicon::dictionary::{DictionaryError, LoadMode, WordDictionary, normalize_word, tokenize};
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

fn temp_file_with(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

/// Collects formatted log lines so tests can count events.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn lines_containing(&self, needle: &str) -> usize {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains(needle))
            .count()
    }
}

impl Write for CapturedLog {
    fn write(&mut self, buffer: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buffer);
        Ok(buffer.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn with_captured_log<T>(body: impl FnOnce() -> T) -> (T, CapturedLog) {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, body);
    (result, log)
}

#[fixture]
fn poem() -> &'static str {
    "Мороз и солнце; день чудесный!\n\
     Ещё ты дремлешь, друг прелестный.\n\
     Frost and sun, a wonderful day! FROST."
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Tokenizer Tests
// =============================================================================

#[rstest]
fn test_tokenize_poem(poem: &str) {
    let words: Vec<&str> = tokenize(poem).collect();
    assert_eq!(words.len(), 17);
    assert_eq!(words[0], "Мороз");
    assert_eq!(words[16], "FROST");
}

#[rstest]
fn test_normalize_word_is_idempotent() {
    let once = normalize_word("ЁЖИК Ёж");
    assert_eq!(normalize_word(&once), once);
}

// =============================================================================
// Loading Tests
// =============================================================================

#[rstest]
fn test_load_from_reader_counts_words(poem: &str) {
    init_tracing();
    let mut dictionary = WordDictionary::new();
    let added = dictionary
        .load_from_reader(Cursor::new(poem), LoadMode::Replace)
        .unwrap();

    assert_eq!(added, 17);
    assert_eq!(dictionary.len(), 16);
    assert_eq!(dictionary.find_word("frost"), Some(2));
    assert_eq!(dictionary.find_word("ещё"), Some(1));
    assert_eq!(dictionary.find_word("МОРОЗ"), Some(1));
    assert!(dictionary.words().validate().is_ok());
}

#[rstest]
fn test_load_from_path_replace_and_append(poem: &str) {
    init_tracing();
    let file = temp_file_with(poem.as_bytes());
    let mut dictionary = WordDictionary::new();
    dictionary.add_word("leftover");

    dictionary.load_from_path(file.path(), LoadMode::Replace).unwrap();
    assert_eq!(dictionary.find_word("leftover"), None);
    assert_eq!(dictionary.find_word("frost"), Some(2));

    dictionary.load_from_path(file.path(), LoadMode::Append).unwrap();
    assert_eq!(dictionary.find_word("frost"), Some(4));
    assert_eq!(dictionary.len(), 16);
}

#[rstest]
fn test_load_from_missing_path_keeps_contents() {
    init_tracing();
    let mut dictionary = WordDictionary::new();
    dictionary.add_word("keep");
    let directory = tempfile::tempdir().unwrap();
    let missing = directory.path().join("missing.txt");

    let error = dictionary
        .load_from_path(&missing, LoadMode::Replace)
        .unwrap_err();

    match error {
        DictionaryError::Io { path, .. } => assert_eq!(path, Some(missing)),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(dictionary.find_word("keep"), Some(1));
}

#[rstest]
fn test_load_invalid_utf8_file_keeps_contents() {
    let file = temp_file_with(b"caf\xE9 au lait");
    let mut dictionary = WordDictionary::new();
    dictionary.add_word("keep");

    let error = dictionary
        .load_from_path(file.path(), LoadMode::Replace)
        .unwrap_err();

    assert!(matches!(error, DictionaryError::InvalidUtf8 { valid_up_to: 3 }));
    assert_eq!(dictionary.entries(), vec![("keep", 1)]);
}

#[rstest]
fn test_load_empty_source_with_replace_clears() {
    let mut dictionary = WordDictionary::new();
    dictionary.add_word("gone");
    let added = dictionary
        .load_from_reader(Cursor::new(" ,.; "), LoadMode::Replace)
        .unwrap();
    assert_eq!(added, 0);
    assert!(dictionary.is_empty());
}

#[rstest]
fn test_load_logs_every_word_and_one_summary() {
    let file = temp_file_with("one two one".as_bytes());
    let mut dictionary = WordDictionary::new();

    let (added, log) =
        with_captured_log(|| dictionary.load_from_path(file.path(), LoadMode::Replace));

    assert_eq!(added.unwrap(), 3);
    assert_eq!(log.lines_containing("word added"), 3);
    assert_eq!(log.lines_containing("dictionary loaded"), 1);
    assert_eq!(log.lines_containing("dictionary file loaded"), 0);
}

#[rstest]
fn test_add_word_logs_like_load() {
    let mut dictionary = WordDictionary::new();
    let (count, log) = with_captured_log(|| dictionary.add_word("One"));

    assert_eq!(count, Some(1));
    assert_eq!(log.lines_containing("word added"), 1);
}

// =============================================================================
// Editing Tests
// =============================================================================

#[rstest]
fn test_add_find_remove_round(poem: &str) {
    let mut dictionary = WordDictionary::new();
    dictionary
        .load_from_reader(Cursor::new(poem), LoadMode::Replace)
        .unwrap();

    assert_eq!(dictionary.add_word("Frost"), Some(3));
    assert!(dictionary.remove_word("FROST"));
    assert_eq!(dictionary.find_word("frost"), None);
    assert_eq!(dictionary.add_word("frost"), Some(1));
}

#[rstest]
fn test_entries_are_sorted() {
    let mut dictionary = WordDictionary::new();
    for word in ["ёж", "яма", "Апельсин", "zebra", "Apple"] {
        dictionary.add_word(word);
    }
    let words: Vec<&str> = dictionary.entries().into_iter().map(|(word, _)| word).collect();
    assert_eq!(words, vec!["apple", "zebra", "апельсин", "яма", "ёж"]);
}

#[rstest]
fn test_diagram_of_dictionary() {
    let mut dictionary = WordDictionary::new();
    for word in ["b", "a", "c"] {
        dictionary.add_word(word);
    }
    assert_eq!(
        dictionary.words().diagram().with_indent(1).to_string(),
        " (\"c\":1 R)\n(\"b\":1 B)\n (\"a\":1 R)\n"
    );
}
