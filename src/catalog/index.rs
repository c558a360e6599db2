use std::collections::{BTreeSet, HashMap};

use crate::core::book::Book;
use crate::core::types::BookId;
use crate::matching::normalize::normalize_book_query;

/// Shorthand inputs that are genuinely ambiguous without an ordinal.
///
/// Seeding them with multiple owners makes the resolver surface a
/// confirmation prompt instead of silently guessing one of the books.
const AMBIGUOUS_SHORTHANDS: &[(&str, &[&str])] = &[
    ("sam", &["1SA", "2SA"]),
    ("samuel", &["1SA", "2SA"]),
];

/// Exact-match index from normalized alias strings to the books that own them.
///
/// Every book's id, display name, API name, and declared aliases are inserted
/// under their normalized form, plus a space-compacted variant so
/// "songofsolomon" still hits. Built once at catalog-load time; immutable
/// afterwards.
#[derive(Debug, Default)]
pub struct AliasIndex {
    entries: HashMap<String, BTreeSet<BookId>>,
}

impl AliasIndex {
    /// Build the index over a set of books.
    #[must_use]
    pub fn build(books: &[Book]) -> Self {
        let mut index = Self::default();

        for book in books {
            for candidate in book.match_candidates() {
                index.add_alias(candidate, &book.id);
            }
        }

        for (alias, ids) in AMBIGUOUS_SHORTHANDS {
            for id in *ids {
                index.add_alias(alias, &BookId::new(*id));
            }
        }

        index
    }

    fn add_alias(&mut self, raw: &str, book_id: &BookId) {
        let normalized = normalize_book_query(raw);
        if normalized.is_empty() {
            return;
        }

        let compact: String = normalized.split_whitespace().collect();
        if compact != normalized {
            self.entries
                .entry(compact)
                .or_default()
                .insert(book_id.clone());
        }
        self.entries
            .entry(normalized)
            .or_default()
            .insert(book_id.clone());
    }

    /// Look up an already-normalized query. Ids come back in stable
    /// (lexicographic) order.
    #[must_use]
    pub fn lookup(&self, normalized: &str) -> Option<&BTreeSet<BookId>> {
        self.entries.get(normalized)
    }

    /// Number of distinct alias keys in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Testament;

    fn sample_books() -> Vec<Book> {
        vec![
            Book::new("1SA", "1 Samuel", Testament::Old, "1 Samuel").with_aliases(vec![
                "1sa".to_string(),
                "1 sam".to_string(),
                "i sam".to_string(),
            ]),
            Book::new("2SA", "2 Samuel", Testament::Old, "2 Samuel")
                .with_aliases(vec!["2sa".to_string(), "2 sam".to_string()]),
            Book::new("SNG", "Song of Solomon", Testament::Old, "Song of Solomon")
                .with_aliases(vec!["song of songs".to_string()]),
        ]
    }

    #[test]
    fn test_name_and_id_are_indexed() {
        let index = AliasIndex::build(&sample_books());

        let hit = index.lookup("1 samuel").unwrap();
        assert_eq!(hit.len(), 1);
        assert!(hit.contains(&BookId::new("1SA")));

        // Ids normalize with a digit/letter split: "1SA" -> "1 sa".
        assert!(index.lookup("1 sa").unwrap().contains(&BookId::new("1SA")));
    }

    #[test]
    fn test_compact_variant_is_indexed() {
        let index = AliasIndex::build(&sample_books());

        let hit = index.lookup("songofsolomon").unwrap();
        assert!(hit.contains(&BookId::new("SNG")));
        assert!(index.lookup("songofsongs").is_some());
    }

    #[test]
    fn test_seeded_shorthands_are_ambiguous() {
        let index = AliasIndex::build(&sample_books());

        let hit = index.lookup("sam").unwrap();
        let ids: Vec<&str> = hit.iter().map(BookId::as_str).collect();
        assert_eq!(ids, vec!["1SA", "2SA"]);
    }

    #[test]
    fn test_ordinal_words_in_aliases_normalize() {
        let index = AliasIndex::build(&sample_books());

        // "i sam" was declared as an alias; it indexes as "1 sam".
        assert!(index.lookup("1 sam").unwrap().contains(&BookId::new("1SA")));
    }
}
