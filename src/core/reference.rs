use serde::{Deserialize, Serialize};

use crate::core::book::Book;
use crate::core::types::BookId;

/// A fully-resolved scripture reference, ready for a text-lookup service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReference {
    /// Canonical book id
    pub book_id: BookId,

    /// Display name of the book
    pub book_name: String,

    /// Name form expected by the upstream text-lookup service
    pub api_name: String,

    /// 1-based chapter number
    pub chapter: u32,

    /// Canonical verse spec ("31-33,46"), None for whole-chapter references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse_spec: Option<String>,

    /// Expanded verse numbers in first-seen order, None for whole chapters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verses: Option<Vec<u32>>,

    /// True when the reference names a whole chapter ("Ps 23")
    pub chapter_whole: bool,

    /// Display string ("Matthew 25:31-33,46")
    pub reference: String,
}

impl ParsedReference {
    /// Assemble a reference for a book and chapter, with an optional verse set.
    #[must_use]
    pub fn new(book: &Book, chapter: u32, verse_spec: Option<VerseSpec>) -> Self {
        let reference = match &verse_spec {
            Some(spec) => format!("{} {}:{}", book.name, chapter, spec.spec),
            None => format!("{} {}", book.name, chapter),
        };

        let (spec, verses) = match verse_spec {
            Some(parsed) => (Some(parsed.spec), Some(parsed.verses)),
            None => (None, None),
        };

        Self {
            book_id: book.id.clone(),
            book_name: book.name.clone(),
            api_name: book.api_name.clone(),
            chapter,
            chapter_whole: spec.is_none(),
            verse_spec: spec,
            verses,
            reference,
        }
    }
}

/// A contiguous run of verses within one chapter (`end >= start`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRange {
    pub start: u32,
    pub end: u32,
}

impl VerseRange {
    #[must_use]
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// A parsed verse specification: the ranges as written, the expanded
/// de-duplicated verse list, and the canonical string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseSpec {
    /// Canonical spec string, re-rendered from the parsed ranges
    pub spec: String,

    /// Expanded verse numbers in first-seen order, duplicates removed
    pub verses: Vec<u32>,

    /// The ranges that produced the verse list (singles are degenerate ranges)
    pub ranges: Vec<VerseRange>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Testament;

    fn matthew() -> Book {
        Book::new("MAT", "Matthew", Testament::New, "Matthew")
    }

    #[test]
    fn test_whole_chapter_reference() {
        let parsed = ParsedReference::new(&matthew(), 5, None);

        assert!(parsed.chapter_whole);
        assert_eq!(parsed.verse_spec, None);
        assert_eq!(parsed.verses, None);
        assert_eq!(parsed.reference, "Matthew 5");
    }

    #[test]
    fn test_verse_reference_display() {
        let spec = VerseSpec {
            spec: "31-33,46".to_string(),
            verses: vec![31, 32, 33, 46],
            ranges: vec![VerseRange::new(31, 33), VerseRange::new(46, 46)],
        };
        let parsed = ParsedReference::new(&matthew(), 25, Some(spec));

        assert!(!parsed.chapter_whole);
        assert_eq!(parsed.reference, "Matthew 25:31-33,46");
        assert_eq!(parsed.verses.as_deref(), Some(&[31, 32, 33, 46][..]));
    }
}
