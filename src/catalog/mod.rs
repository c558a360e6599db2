//! Book catalog storage and indexing.
//!
//! The catalog contains the 66 canonical Protestant-canon books with their
//! ids, display names, API names, and curated aliases. An embedded catalog is
//! compiled into the library, but custom catalogs can also be loaded from
//! JSON files. Alongside it lives the generated per-chapter verse-count
//! index used for chapter-bound validation and verse-offset mapping.
//!
//! All indexes are built once at load time and never mutated afterwards, so
//! the catalog can be shared freely across concurrent resolve calls.
//!
//! ## Example
//!
//! ```rust
//! use scripture_ref::catalog::store::BookCatalog;
//! use scripture_ref::catalog::verse_counts::VerseCountIndex;
//! use scripture_ref::core::types::BookId;
//!
//! let catalog = BookCatalog::load_embedded().unwrap();
//! let counts = VerseCountIndex::load_embedded(&catalog).unwrap();
//!
//! let john = catalog.get(&BookId::new("JHN")).unwrap();
//! assert_eq!(john.name, "John");
//! assert_eq!(counts.chapter_count(&john.id), 21);
//! ```

pub mod groups;
pub mod index;
pub mod store;
pub mod verse_counts;

pub use groups::{group_by_id, group_for_book, BookGroup, GROUPS};
pub use index::AliasIndex;
pub use store::{BookCatalog, CatalogError};
pub use verse_counts::{VerseCountIndex, VerseCountError, VersePosition, VerseScope, VerseTotals};
