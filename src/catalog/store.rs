use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::catalog::index::AliasIndex;
use crate::core::book::Book;
use crate::core::types::{BookId, Testament};
use crate::matching::normalize::normalize_book_query;
use crate::utils::validation::is_canonical_book_id;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub books: Vec<Book>,
}

/// The canonical book catalog with its lookup indexes.
///
/// Loaded once at startup and never mutated afterwards; safe to share
/// across any number of concurrent resolve calls.
#[derive(Debug)]
pub struct BookCatalog {
    /// All books, in canonical order
    books: Vec<Book>,

    /// Index: book id -> index in books vec
    id_to_index: HashMap<BookId, usize>,

    /// Index: exact normalized alias -> owning book id (first book wins)
    exact_alias_to_id: HashMap<String, BookId>,

    /// The resolver's alias index (normalized alias -> all owning ids)
    alias_index: AliasIndex,

    /// Pre-normalized match strings per book, parallel to `books`
    /// (id, name, API name, aliases after query normalization, de-duplicated)
    match_keys: Vec<Vec<String>>,
}

impl BookCatalog {
    /// Load the embedded default catalog.
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Embedded at compile time; build.rs validates the file.
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/books.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        if data.version != CATALOG_VERSION {
            tracing::warn!(
                expected = CATALOG_VERSION,
                found = %data.version,
                "catalog version mismatch"
            );
        }

        Self::from_books(data.books)
    }

    /// Build a catalog from book records, validating ids and building all
    /// indexes up front.
    pub fn from_books(books: Vec<Book>) -> Result<Self, CatalogError> {
        let mut id_to_index = HashMap::with_capacity(books.len());
        let mut exact_alias_to_id = HashMap::new();

        for (index, book) in books.iter().enumerate() {
            if !is_canonical_book_id(book.id.as_str()) {
                return Err(CatalogError::InvalidCatalog(format!(
                    "book id {:?} is not a canonical id",
                    book.id.as_str()
                )));
            }
            if id_to_index.insert(book.id.clone(), index).is_some() {
                return Err(CatalogError::InvalidCatalog(format!(
                    "duplicate book id {}",
                    book.id
                )));
            }

            for candidate in book.match_candidates() {
                let normalized = normalize_exact_alias(candidate);
                if normalized.is_empty() {
                    continue;
                }
                // First book wins; ambiguous short aliases never overwrite.
                exact_alias_to_id
                    .entry(normalized)
                    .or_insert_with(|| book.id.clone());
            }
        }

        let alias_index = AliasIndex::build(&books);

        let match_keys = books
            .iter()
            .map(|book| {
                let mut keys: Vec<String> = Vec::new();
                for candidate in book.match_candidates() {
                    let normalized = normalize_book_query(candidate);
                    if !normalized.is_empty() && !keys.contains(&normalized) {
                        keys.push(normalized);
                    }
                }
                keys
            })
            .collect();

        Ok(Self {
            books,
            id_to_index,
            exact_alias_to_id,
            alias_index,
            match_keys,
        })
    }

    /// All books in canonical order.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Get a book by id.
    #[must_use]
    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.id_to_index.get(id).map(|&idx| &self.books[idx])
    }

    /// Get a book by id string, case-insensitively.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&Book> {
        self.get(&BookId::new(id.to_uppercase()))
    }

    /// Exact alias lookup without fuzzy matching: trims, lowercases, strips
    /// periods, collapses whitespace, and falls back to a space-compacted
    /// form ("songofsolomon"). First declared owner wins for short aliases
    /// shared across books.
    #[must_use]
    pub fn lookup_id(&self, input: &str) -> Option<&BookId> {
        let normalized = normalize_exact_alias(input);
        if normalized.is_empty() {
            return None;
        }
        if let Some(id) = self.exact_alias_to_id.get(&normalized) {
            return Some(id);
        }

        let compact: String = normalized.split_whitespace().collect();
        self.exact_alias_to_id.get(&compact)
    }

    /// Ids of all books in one testament, in canonical order.
    #[must_use]
    pub fn ids_by_testament(&self, testament: Testament) -> Vec<&BookId> {
        self.books
            .iter()
            .filter(|book| book.testament == testament)
            .map(|book| &book.id)
            .collect()
    }

    /// The resolver's alias index.
    #[must_use]
    pub fn alias_index(&self) -> &AliasIndex {
        &self.alias_index
    }

    /// Pre-normalized match strings for the book at a canonical index.
    #[must_use]
    pub(crate) fn match_keys(&self, index: usize) -> &[String] {
        &self.match_keys[index]
    }

    /// Export the catalog to JSON.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            books: self.books.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of books in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Exact-lookup normalization: trim, lowercase, strip periods, collapse
/// whitespace. Deliberately lighter than the resolver's query
/// normalization; no digit/letter splits and no ordinal-word mapping.
fn normalize_exact_alias(value: &str) -> String {
    let stripped: String = value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|&c| c != '.')
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
