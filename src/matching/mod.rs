//! Book-name resolution: normalization, similarity scoring, and ranking.
//!
//! This module provides the resolver half of reference resolution:
//!
//! - [`BookResolver`]: Main entry point for resolving free-text book names
//! - [`ResolverResult`]: Tagged outcome (resolved / needs confirmation / not found)
//! - [`normalize`]: Query normalization shared with the alias index
//! - [`scoring`]: String- and token-level similarity functions
//!
//! ## Matching Algorithm
//!
//! Resolution runs in two passes:
//!
//! 1. **Exact alias pass**: the normalized input is looked up in the alias
//!    index. One owner resolves immediately at score 1.0; several owners
//!    (deliberately ambiguous shorthands like "sam") request confirmation.
//! 2. **Fuzzy pass**: every catalog book is scored with a blend of
//!    normalized Levenshtein similarity (0.65) and token-set Jaccard
//!    similarity (0.35), plus small prefix bonuses. Leading-ordinal
//!    mismatches are penalized hard so "2 john" can never land on the wrong
//!    book.
//!
//! A fuzzy winner must clear the auto-resolve floor (0.92) and stand clear
//! of the runner-up; everything else comes back as a ranked confirmation
//! request.
//!
//! ## Example
//!
//! ```rust
//! use scripture_ref::catalog::store::BookCatalog;
//! use scripture_ref::matching::resolver::{BookResolver, ResolverResult};
//!
//! let catalog = BookCatalog::load_embedded().unwrap();
//! let resolver = BookResolver::new(&catalog);
//!
//! match resolver.resolve("1sam") {
//!     ResolverResult::Resolved(resolved) => {
//!         assert_eq!(resolved.book_id.as_str(), "1SA");
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

pub mod normalize;
pub mod resolver;
pub mod scoring;

pub use resolver::{
    BookConfirmation, BookNotFound, BookResolver, Candidate, ResolvedBook, ResolverConfig,
    ResolverResult,
};
