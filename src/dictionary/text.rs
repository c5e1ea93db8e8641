//! Word splitting and case folding.

/// Splits text into words.
///
/// Words are separated by ASCII whitespace (vertical tab included) and ASCII
/// punctuation. Every other character, including all non-ASCII text, is part
/// of a word. Empty pieces are skipped.
///
/// # Examples
///
/// ```rust
/// use lexicon::dictionary::tokenize;
///
/// let words: Vec<&str> = tokenize("Hello, world!  Привет -- мир.").collect();
/// assert_eq!(words, vec!["Hello", "world", "Привет", "мир"]);
/// ```
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|word| !word.is_empty())
}

const fn is_separator(character: char) -> bool {
    character.is_ascii_whitespace() || character == '\x0B' || character.is_ascii_punctuation()
}

/// Lower-cases Latin `A`-`Z` and Cyrillic `А`-`Я` and `Ё`.
///
/// All other characters are kept as they are, so the result has the same
/// number of characters as the input.
///
/// # Examples
///
/// ```rust
/// use lexicon::dictionary::normalize_word;
///
/// assert_eq!(normalize_word("Ёлка"), "ёлка");
/// assert_eq!(normalize_word("HeLLo"), "hello");
/// assert_eq!(normalize_word("Ärger"), "Ärger");
/// ```
#[must_use]
pub fn normalize_word(word: &str) -> String {
    word.chars().map(fold_case).collect()
}

fn fold_case(character: char) -> char {
    match character {
        'A'..='Z' | 'А'..='Я' | 'Ё' => character.to_lowercase().next().unwrap_or(character),
        _ => character,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", vec![])]
    #[case("   ", vec![])]
    #[case("one", vec!["one"])]
    #[case("one two\tthree\nfour", vec!["one", "two", "three", "four"])]
    #[case("a,b;c.d!e?f", vec!["a", "b", "c", "d", "e", "f"])]
    #[case("vertical\x0Btab", vec!["vertical", "tab"])]
    #[case("don't", vec!["don", "t"])]
    #[case("«ёлки» — палки", vec!["«ёлки»", "—", "палки"])]
    fn test_tokenize(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(tokenize(text).collect::<Vec<_>>(), expected);
    }

    #[rstest]
    #[case("ABC", "abc")]
    #[case("АБВГДЕЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ", "абвгдежзийклмнопрстуфхцчшщъыьэюя")]
    #[case("ЁЖ", "ёж")]
    #[case("already lower", "already lower")]
    #[case("ÄÖÜ", "ÄÖÜ")]
    #[case("Mixed123", "mixed123")]
    fn test_normalize_word(#[case] word: &str, #[case] expected: &str) {
        assert_eq!(normalize_word(word), expected);
    }

    #[rstest]
    fn test_normalize_keeps_character_count() {
        let word = "ПрИвЕт, World";
        assert_eq!(normalize_word(word).chars().count(), word.chars().count());
    }
}
