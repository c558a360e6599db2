//! Query normalization for book-name matching.
//!
//! Free-text book names arrive with every imaginable spelling: "1sam",
//! "I-SAMUEL!!!", "Song-of-Songs", "ps23". Normalization folds all of them
//! onto one canonical lowercase form before any matching happens, so the
//! alias index and the fuzzy scorer only ever see clean token streams.

/// Map an ordinal-word token to its digit form ("first"/"1st"/"one"/"i" -> "1").
///
/// Tokens outside the fixed table pass through unchanged.
#[must_use]
pub fn normalize_ordinal_token(token: &str) -> &str {
    match token {
        "first" | "1st" | "one" | "i" => "1",
        "second" | "2nd" | "two" | "ii" => "2",
        "third" | "3rd" | "three" | "iii" => "3",
        other => other,
    }
}

/// Normalize a free-text book query for matching.
///
/// Lowercases, converts punctuation runs to single spaces, splits
/// digit/letter boundaries ("1sam" -> "1 sam", "ps23" -> "ps 23"), collapses
/// whitespace, and maps ordinal-word tokens to digits. Returns an empty
/// string when nothing matchable remains.
///
/// # Examples
///
/// ```
/// use scripture_ref::matching::normalize::normalize_book_query;
///
/// assert_eq!(normalize_book_query("I-SAMUEL!!!"), "1 samuel");
/// assert_eq!(normalize_book_query("Song of Songs"), "song of songs");
/// assert_eq!(normalize_book_query("@@@###"), "");
/// ```
#[must_use]
pub fn normalize_book_query(input: &str) -> String {
    let lowered = input.trim().to_lowercase();

    // One scan handles the punctuation-to-space collapse and the
    // digit/letter boundary splits in either direction.
    let mut spaced = String::with_capacity(lowered.len() + 4);
    let mut prev: Option<char> = None;
    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() {
            if let Some(p) = prev {
                if p.is_ascii_alphanumeric() && p.is_ascii_digit() != ch.is_ascii_digit() {
                    spaced.push(' ');
                }
            }
            spaced.push(ch);
        } else if prev.is_some_and(|p| p.is_ascii_alphanumeric()) {
            spaced.push(' ');
        }
        prev = Some(ch);
    }

    let tokens: Vec<&str> = spaced
        .split_whitespace()
        .map(normalize_ordinal_token)
        .collect();

    tokens.join(" ")
}

/// Split a normalized query into its tokens.
#[must_use]
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

/// The leading ordinal digit of a normalized query, if its first token is
/// exactly "1", "2", or "3".
#[must_use]
pub fn leading_ordinal(tokens: &[&str]) -> Option<u8> {
    match tokens.first() {
        Some(&"1") => Some(1),
        Some(&"2") => Some(2),
        Some(&"3") => Some(3),
        _ => None,
    }
}

/// The query with its leading ordinal token removed ("1 genesis" -> "genesis").
///
/// Returns an empty string when the ordinal was the only token.
#[must_use]
pub fn strip_leading_ordinal(tokens: &[&str]) -> String {
    tokens.get(1..).unwrap_or_default().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize_book_query("  John  "), "john");
        assert_eq!(normalize_book_query("1 Samuel"), "1 samuel");
    }

    #[test]
    fn test_normalize_digit_letter_boundaries() {
        assert_eq!(normalize_book_query("1sam"), "1 sam");
        assert_eq!(normalize_book_query("ps23"), "ps 23");
        assert_eq!(normalize_book_query("1samuel"), "1 samuel");
    }

    #[test]
    fn test_normalize_punctuation_and_dashes() {
        assert_eq!(normalize_book_query("1-sam"), "1 sam");
        assert_eq!(normalize_book_query("1 sam."), "1 sam");
        assert_eq!(normalize_book_query("song-of-songs"), "song of songs");
        // Unicode dashes behave like any other punctuation.
        assert_eq!(normalize_book_query("1\u{2013}sam"), "1 sam");
        assert_eq!(normalize_book_query("1\u{2014}sam"), "1 sam");
    }

    #[test]
    fn test_normalize_ordinal_words() {
        assert_eq!(normalize_book_query("first samuel"), "1 samuel");
        assert_eq!(normalize_book_query("2nd Kings"), "2 kings");
        assert_eq!(normalize_book_query("iii john"), "3 john");
        assert_eq!(normalize_book_query("i sam"), "1 sam");
    }

    #[test]
    fn test_normalize_empty_and_garbage() {
        assert_eq!(normalize_book_query(""), "");
        assert_eq!(normalize_book_query("   "), "");
        assert_eq!(normalize_book_query("@@@###"), "");
    }

    #[test]
    fn test_leading_ordinal_extraction() {
        let tokens = tokenize("2 kings");
        assert_eq!(leading_ordinal(&tokens), Some(2));
        assert_eq!(strip_leading_ordinal(&tokens), "kings");

        let no_ordinal = tokenize("kings");
        assert_eq!(leading_ordinal(&no_ordinal), None);

        // "4 ezra" is not a recognized ordinal.
        let high = tokenize("4 ezra");
        assert_eq!(leading_ordinal(&high), None);
    }
}
