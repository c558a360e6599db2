//! # scripture-ref
//!
//! A library for resolving free-text Bible references to canonical book,
//! chapter, and verse sets.
//!
//! Humans type references every way imaginable: "matt 25:31-33,46",
//! "1 cor 13:4-7", "I-SAMUEL!!!", "ps23". Downstream text services want
//! exactly one thing: a canonical (book, chapter, verse-set) triple.
//!
//! `scripture-ref` bridges the two with a fuzzy, ambiguity-aware book
//! resolver over the 66-book Protestant canon and a structural reference
//! parser on top of it.
//!
//! ## Features
//!
//! - **Alias matching**: ids, names, abbreviations, and misspellings all
//!   land on the right book ("1sam", "i sam", "1-sam" are all 1 Samuel)
//! - **Fuzzy matching**: edit-distance plus token-overlap scoring catches
//!   typos without ever guessing below a confidence floor
//! - **Ambiguity surfacing**: "sam" returns ranked candidates for
//!   confirmation instead of silently picking a Samuel
//! - **Structural parsing**: chapters, single verses, ascending ranges, and
//!   discontiguous verse lists, with chapter-bound validation
//! - **Verse-count index**: per-chapter verse counts with totals and
//!   deterministic offset mapping for verse-of-the-day style features
//!
//! ## Example
//!
//! ```rust
//! use scripture_ref::{BookCatalog, ReferenceParser, VerseCountIndex};
//!
//! let catalog = BookCatalog::load_embedded().unwrap();
//! let counts = VerseCountIndex::load_embedded(&catalog).unwrap();
//! let parser = ReferenceParser::new(&catalog, &counts);
//!
//! let parsed = parser.parse("matt 25:31-33,46").unwrap();
//! assert_eq!(parsed.book_id.as_str(), "MAT");
//! assert_eq!(parsed.chapter, 25);
//! assert_eq!(parsed.reference, "Matthew 25:31-33,46");
//! ```
//!
//! Interactive callers use [`ReferenceParser::parse_detailed`] instead,
//! which returns a tagged outcome (ok / needs-confirmation / error) so an
//! ambiguous book can be bounced back to the user as a candidate list.
//!
//! ## Modules
//!
//! - [`catalog`]: Book catalog, alias index, verse-count index, book groups
//! - [`core`]: Core data types for books, references, and verse specs
//! - [`matching`]: Book-name resolver and scoring algorithms
//! - [`parsing`]: Reference and verse-spec parsers
//!
//! All data is loaded once and never mutated; every entry point is a pure
//! function over it, safe to call from any number of threads.

pub mod catalog;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::groups::{group_by_id, group_for_book, BookGroup, GROUPS};
pub use catalog::store::{BookCatalog, CatalogError};
pub use catalog::verse_counts::{VerseCountIndex, VersePosition, VerseScope};
pub use core::book::Book;
pub use core::reference::{ParsedReference, VerseRange, VerseSpec};
pub use core::types::*;
pub use matching::resolver::{
    BookResolver, Candidate, ResolvedBook, ResolverConfig, ResolverResult,
};
pub use parsing::reference::{
    ParseError, ParseOutcome, ParserConfig, ReferenceError, ReferenceParser,
};
pub use parsing::verse_spec::{parse_verse_spec, VerseSpecError};
