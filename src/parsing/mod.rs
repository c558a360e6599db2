//! Parsers for free-text scripture references and verse specifications.
//!
//! This module provides the parser half of reference resolution:
//!
//! - [`ReferenceParser`]: Splits "matt 25:31-33,46" into book, chapter, and
//!   verses, resolving the book through the fuzzy resolver
//! - [`parse_verse_spec`]: The shared verse-spec grammar (singles, ascending
//!   ranges, discontiguous lists)
//! - [`ParseOutcome`]: Tagged result — ok, needs-confirmation, or error —
//!   always returned, never raised, so callers branch without exception
//!   control flow
//!
//! ## Reference Grammar
//!
//! A reference is a book fragment followed by an optional trailing chapter
//! and verse spec:
//!
//! | Input | Meaning |
//! |---|---|
//! | `John` | whole book name, chapter 1 assumed |
//! | `Ps 23` | whole chapter |
//! | `John 3:16` | single verse |
//! | `matt 25:31-33,46` | discontiguous verse set |
//!
//! The *last* run of digits anchors the chapter; book names never end in
//! digits except through this chapter marker.
//!
//! ## Example
//!
//! ```rust
//! use scripture_ref::catalog::store::BookCatalog;
//! use scripture_ref::catalog::verse_counts::VerseCountIndex;
//! use scripture_ref::parsing::reference::ReferenceParser;
//!
//! let catalog = BookCatalog::load_embedded().unwrap();
//! let counts = VerseCountIndex::load_embedded(&catalog).unwrap();
//! let parser = ReferenceParser::new(&catalog, &counts);
//!
//! let parsed = parser.parse("1 cor 13:4-7").unwrap();
//! assert_eq!(parsed.book_id.as_str(), "1CO");
//! assert_eq!(parsed.verses.as_deref(), Some(&[4, 5, 6, 7][..]));
//! ```

pub mod reference;
pub mod verse_spec;

pub use reference::{
    normalize_reference_input, ParseError, ParseFailure, ParseOutcome, ParsedOk, ParserConfig,
    PendingConfirmation, ReferenceError, ReferenceParser, ReferenceParts,
};
pub use verse_spec::{parse_verse_spec, VerseSpecError};
