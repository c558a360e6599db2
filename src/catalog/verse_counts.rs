use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::catalog::store::BookCatalog;
use crate::core::types::{BookId, Testament};

#[derive(Error, Debug)]
pub enum VerseCountError {
    #[error("Failed to read verse count index: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse verse count index: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid verse count index: {0}")]
    InvalidFormat(String),
}

/// On-disk format of the generated verse-count data file
#[derive(Debug, Deserialize)]
struct VerseCountData {
    #[serde(rename = "translationId")]
    translation_id: String,

    #[serde(rename = "generatedAt", default)]
    #[allow(dead_code)] // diagnostic field in the generated file
    generated_at: Option<String>,

    books: HashMap<String, BookCountData>,
}

#[derive(Debug, Deserialize)]
struct BookCountData {
    testament: Testament,
    chapters: HashMap<String, u32>,
}

/// Per-book verse counts, chapters stored densely (index 0 is chapter 1)
#[derive(Debug, Clone)]
struct BookVerseCounts {
    testament: Testament,
    chapters: Vec<u32>,
    total: u64,
}

/// Verse totals across the whole index
#[derive(Debug, Clone, Serialize)]
pub struct VerseTotals {
    pub all: u64,
    pub ot: u64,
    pub nt: u64,
    pub by_book: HashMap<BookId, u64>,
}

/// One verse position, produced by the offset-mapping helpers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersePosition {
    pub book_id: BookId,
    pub chapter: u32,
    pub verse: u32,
}

/// A scope for offset mapping: a whole testament or a single book
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerseScope {
    Testament(Testament),
    Book(BookId),
}

/// Static per-book, per-chapter verse counts.
///
/// Used by the reference parser to validate chapter bounds, and by callers
/// that map a verse offset in `[0, total)` to a concrete position (the
/// caller supplies the offset; drawing it randomly is caller business, which
/// keeps this index a pure lookup structure).
#[derive(Debug)]
pub struct VerseCountIndex {
    translation_id: String,
    books: HashMap<BookId, BookVerseCounts>,
    /// Canonical-order book ids per testament, from the catalog
    ot_order: Vec<BookId>,
    nt_order: Vec<BookId>,
    totals: VerseTotals,
}

impl VerseCountIndex {
    /// Load the embedded generated index for the WEB translation.
    pub fn load_embedded(catalog: &BookCatalog) -> Result<Self, VerseCountError> {
        const EMBEDDED_COUNTS: &str = include_str!("../../catalogs/web_verse_counts.json");
        Self::from_json(EMBEDDED_COUNTS, catalog)
    }

    /// Load an index from a JSON file.
    pub fn load_from_file(path: &Path, catalog: &BookCatalog) -> Result<Self, VerseCountError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content, catalog)
    }

    /// Parse and validate an index from a JSON string.
    ///
    /// Every book id must exist in the catalog with a matching testament,
    /// and every book's chapters must run from 1 with no gaps.
    pub fn from_json(json: &str, catalog: &BookCatalog) -> Result<Self, VerseCountError> {
        let data: VerseCountData = serde_json::from_str(json)?;

        if data.translation_id.trim().is_empty() {
            return Err(VerseCountError::InvalidFormat(
                "missing translation id".to_string(),
            ));
        }

        let mut books = HashMap::with_capacity(data.books.len());
        for (raw_id, record) in data.books {
            let book_id = BookId::new(raw_id.to_uppercase());
            let book = catalog.get(&book_id).ok_or_else(|| {
                VerseCountError::InvalidFormat(format!("unknown book id {book_id}"))
            })?;
            if book.testament != record.testament {
                return Err(VerseCountError::InvalidFormat(format!(
                    "testament mismatch for {book_id}"
                )));
            }

            let chapters = dense_chapters(&book_id, &record.chapters)?;
            let total = chapters.iter().map(|&c| u64::from(c)).sum();
            books.insert(
                book_id,
                BookVerseCounts {
                    testament: record.testament,
                    chapters,
                    total,
                },
            );
        }

        let ot_order: Vec<BookId> = catalog
            .ids_by_testament(Testament::Old)
            .into_iter()
            .filter(|id| books.contains_key(*id))
            .cloned()
            .collect();
        let nt_order: Vec<BookId> = catalog
            .ids_by_testament(Testament::New)
            .into_iter()
            .filter(|id| books.contains_key(*id))
            .cloned()
            .collect();

        let totals = compute_totals(&books);

        Ok(Self {
            translation_id: data.translation_id,
            books,
            ot_order,
            nt_order,
            totals,
        })
    }

    /// Translation this index was generated from ("web").
    #[must_use]
    pub fn translation_id(&self) -> &str {
        &self.translation_id
    }

    /// Number of chapters in a book; 0 when the book is unknown to the
    /// index, which callers treat as "skip bound validation".
    #[must_use]
    pub fn chapter_count(&self, book_id: &BookId) -> u32 {
        self.books
            .get(book_id)
            .map(|b| b.chapters.len() as u32)
            .unwrap_or(0)
    }

    /// Number of verses in one chapter; 0 when unknown.
    #[must_use]
    pub fn verse_count(&self, book_id: &BookId, chapter: u32) -> u32 {
        let Some(book) = self.books.get(book_id) else {
            return 0;
        };
        if chapter == 0 {
            return 0;
        }
        book.chapters.get(chapter as usize - 1).copied().unwrap_or(0)
    }

    /// Verse totals per book, per testament, and overall.
    #[must_use]
    pub fn totals(&self) -> &VerseTotals {
        &self.totals
    }

    /// Map a verse offset within a book to its chapter and verse.
    ///
    /// Offset 0 is chapter 1 verse 1; returns None when the offset is at or
    /// beyond the book's total verse count, or the book is unknown.
    #[must_use]
    pub fn verse_at_offset(&self, book_id: &BookId, offset: u64) -> Option<VersePosition> {
        let book = self.books.get(book_id)?;
        if offset >= book.total {
            return None;
        }

        let mut remaining = offset;
        for (idx, &count) in book.chapters.iter().enumerate() {
            let count = u64::from(count);
            if remaining < count {
                return Some(VersePosition {
                    book_id: book_id.clone(),
                    chapter: idx as u32 + 1,
                    verse: remaining as u32 + 1,
                });
            }
            remaining -= count;
        }

        None
    }

    /// Map a verse offset within a whole testament, walking books in
    /// canonical order.
    #[must_use]
    pub fn verse_at_testament_offset(
        &self,
        testament: Testament,
        offset: u64,
    ) -> Option<VersePosition> {
        let order = match testament {
            Testament::Old => &self.ot_order,
            Testament::New => &self.nt_order,
        };

        let mut remaining = offset;
        for book_id in order {
            let book_total = self.books.get(book_id).map(|b| b.total).unwrap_or(0);
            if remaining < book_total {
                return self.verse_at_offset(book_id, remaining);
            }
            remaining -= book_total;
        }

        None
    }

    /// Parse a scope string: "OT", "NT", or a book id (case-insensitive).
    #[must_use]
    pub fn parse_scope(&self, scope: &str) -> Option<VerseScope> {
        if let Some(testament) = Testament::parse(scope) {
            return Some(VerseScope::Testament(testament));
        }

        let book_id = BookId::new(scope.trim().to_uppercase());
        self.books
            .contains_key(&book_id)
            .then_some(VerseScope::Book(book_id))
    }

    /// Total verse count of a scope.
    #[must_use]
    pub fn scope_total(&self, scope: &VerseScope) -> u64 {
        match scope {
            VerseScope::Testament(Testament::Old) => self.totals.ot,
            VerseScope::Testament(Testament::New) => self.totals.nt,
            VerseScope::Book(book_id) => {
                self.totals.by_book.get(book_id).copied().unwrap_or(0)
            }
        }
    }

    /// Map a verse offset within a scope to its position.
    #[must_use]
    pub fn verse_at_scope_offset(&self, scope: &VerseScope, offset: u64) -> Option<VersePosition> {
        match scope {
            VerseScope::Testament(testament) => self.verse_at_testament_offset(*testament, offset),
            VerseScope::Book(book_id) => self.verse_at_offset(book_id, offset),
        }
    }
}

/// Convert the sparse chapter map to a dense, gapless vector.
fn dense_chapters(
    book_id: &BookId,
    chapters: &HashMap<String, u32>,
) -> Result<Vec<u32>, VerseCountError> {
    if chapters.is_empty() {
        return Err(VerseCountError::InvalidFormat(format!(
            "{book_id} has no chapters"
        )));
    }

    let mut dense = vec![0u32; chapters.len()];
    for (raw_number, &count) in chapters {
        let number: usize = raw_number.parse().map_err(|_| {
            VerseCountError::InvalidFormat(format!(
                "{book_id} has non-numeric chapter key {raw_number:?}"
            ))
        })?;
        if number == 0 || number > dense.len() {
            return Err(VerseCountError::InvalidFormat(format!(
                "{book_id} chapters are not gapless (found chapter {number} of {})",
                dense.len()
            )));
        }
        if count == 0 {
            return Err(VerseCountError::InvalidFormat(format!(
                "{book_id} chapter {number} has zero verses"
            )));
        }
        dense[number - 1] = count;
    }

    // A key within range can still collide, leaving another slot empty.
    if dense.contains(&0) {
        return Err(VerseCountError::InvalidFormat(format!(
            "{book_id} chapters are not gapless"
        )));
    }

    Ok(dense)
}

fn compute_totals(books: &HashMap<BookId, BookVerseCounts>) -> VerseTotals {
    let mut totals = VerseTotals {
        all: 0,
        ot: 0,
        nt: 0,
        by_book: HashMap::with_capacity(books.len()),
    };

    for (book_id, book) in books {
        totals.by_book.insert(book_id.clone(), book.total);
        totals.all += book.total;
        match book.testament {
            Testament::Old => totals.ot += book.total,
            Testament::New => totals.nt += book.total,
        }
    }

    totals
}
