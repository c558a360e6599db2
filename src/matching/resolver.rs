use serde::Serialize;

use crate::catalog::store::BookCatalog;
use crate::core::book::Book;
use crate::core::types::{BookId, ConfirmationReason, NotFoundReason, ResolveMethod};
use crate::matching::normalize::{
    leading_ordinal, normalize_book_query, strip_leading_ordinal, tokenize,
};
use crate::matching::scoring::{clamp01, score_normalized_query};

/// Default number of candidates returned for confirmation
pub const DEFAULT_MAX_CANDIDATES: usize = 5;

/// Minimum fuzzy score required to auto-resolve without confirmation.
///
/// Together with [`AMBIGUOUS_SCORE_DELTA`] and [`AMBIGUOUS_SCORE_FLOOR`],
/// this trades false auto-resolves against confirmation-prompt friction.
/// The comparison operators are part of the contract.
pub const AUTO_RESOLVE_MIN_SCORE: f64 = 0.92;

/// Two candidates this close (when both clear the floor) force confirmation
pub const AMBIGUOUS_SCORE_DELTA: f64 = 0.06;

/// Floor both of two close candidates must clear to count as ambiguous
pub const AMBIGUOUS_SCORE_FLOOR: f64 = 0.75;

/// Score assigned to each candidate of an ambiguous exact-alias hit
const ALIAS_AMBIGUOUS_SCORE: f64 = 0.86;

/// Penalty when the input's leading ordinal differs from the book's
const ORDINAL_MISMATCH_PENALTY: f64 = 0.35;

/// Penalty when the input carries an ordinal but the book has none
const MISSING_ORDINAL_PENALTY: f64 = 0.15;

/// Weight of the ordinal-stripped rescue score for books without ordinal
/// variants. Keeps an exact remainder match ("1 genesis" -> "genesis")
/// above the auto-resolve floor while ranking it below a true full match.
const STRIPPED_ORDINAL_WEIGHT: f64 = 0.95;

/// Configuration for the book resolver
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum candidates carried on confirmation results
    pub max_candidates: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

/// One ranked candidate book
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub book_id: BookId,
    pub book: Book,
    /// Similarity score in [0, 1]
    pub score: f64,
    pub method: ResolveMethod,
}

/// A confidently-resolved book
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedBook {
    /// Raw input as given
    pub input: String,
    /// Input after query normalization
    pub normalized_input: String,
    pub book_id: BookId,
    pub book: Book,
    pub score: f64,
    pub method: ResolveMethod,
    /// The ranking that produced this resolution
    pub candidates: Vec<Candidate>,
}

/// A resolution that needs caller confirmation before use
#[derive(Debug, Clone, Serialize)]
pub struct BookConfirmation {
    pub input: String,
    pub normalized_input: String,
    /// Score of the best candidate
    pub score: f64,
    pub method: ResolveMethod,
    /// Ranked candidates, capped to the configured maximum
    pub candidates: Vec<Candidate>,
    pub reason: ConfirmationReason,
}

/// No book matched the input
#[derive(Debug, Clone, Serialize)]
pub struct BookNotFound {
    pub input: String,
    pub normalized_input: String,
    /// Always empty; present so all variants share one candidate shape
    pub candidates: Vec<Candidate>,
    pub reason: NotFoundReason,
}

/// Outcome of a resolve call
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolverResult {
    Resolved(ResolvedBook),
    NeedsConfirmation(BookConfirmation),
    NotFound(BookNotFound),
}

impl ResolverResult {
    /// The resolution, when the input resolved confidently.
    #[must_use]
    pub fn resolved(&self) -> Option<&ResolvedBook> {
        match self {
            Self::Resolved(resolved) => Some(resolved),
            _ => None,
        }
    }

    /// Ranked candidates carried by this result (empty for not-found).
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        match self {
            Self::Resolved(r) => &r.candidates,
            Self::NeedsConfirmation(c) => &c.candidates,
            Self::NotFound(n) => &n.candidates,
        }
    }

    /// The normalized form of the input that was resolved.
    #[must_use]
    pub fn normalized_input(&self) -> &str {
        match self {
            Self::Resolved(r) => &r.normalized_input,
            Self::NeedsConfirmation(c) => &c.normalized_input,
            Self::NotFound(n) => &n.normalized_input,
        }
    }
}

/// Resolves free-text book names against the catalog.
///
/// Pure function over the catalog's immutable data: an exact pass through
/// the alias index, then a fuzzy pass scoring every book. Conservative by
/// design; anything short of a clear winner comes back as a confirmation
/// request rather than a guess.
pub struct BookResolver<'a> {
    catalog: &'a BookCatalog,
    config: ResolverConfig,
}

impl<'a> BookResolver<'a> {
    /// Create a resolver with default configuration.
    #[must_use]
    pub fn new(catalog: &'a BookCatalog) -> Self {
        Self {
            catalog,
            config: ResolverConfig::default(),
        }
    }

    /// Create a resolver with custom configuration.
    #[must_use]
    pub fn with_config(catalog: &'a BookCatalog, config: ResolverConfig) -> Self {
        Self { catalog, config }
    }

    /// Resolve a free-text book name.
    #[must_use]
    pub fn resolve(&self, input: &str) -> ResolverResult {
        let normalized = normalize_book_query(input);
        if normalized.is_empty() {
            return ResolverResult::NotFound(BookNotFound {
                input: input.to_string(),
                normalized_input: normalized,
                candidates: Vec::new(),
                reason: NotFoundReason::Empty,
            });
        }

        if let Some(result) = self.resolve_by_alias(input, &normalized) {
            return result;
        }

        self.resolve_fuzzy(input, &normalized)
    }

    /// Exact pass: the normalized input is a key in the alias index.
    fn resolve_by_alias(&self, input: &str, normalized: &str) -> Option<ResolverResult> {
        let ids = self.catalog.alias_index().lookup(normalized)?;

        if ids.len() == 1 {
            let book_id = ids.iter().next()?.clone();
            let book = self.catalog.get(&book_id)?.clone();
            let candidate = Candidate {
                book_id: book_id.clone(),
                book: book.clone(),
                score: 1.0,
                method: ResolveMethod::Alias,
            };
            return Some(ResolverResult::Resolved(ResolvedBook {
                input: input.to_string(),
                normalized_input: normalized.to_string(),
                book_id,
                book,
                score: 1.0,
                method: ResolveMethod::Alias,
                candidates: vec![candidate],
            }));
        }

        // Ambiguous alias: surface the owners so the caller can confirm.
        let mut candidates: Vec<Candidate> = ids
            .iter()
            .filter_map(|id| {
                self.catalog.get(id).map(|book| Candidate {
                    book_id: id.clone(),
                    book: book.clone(),
                    score: ALIAS_AMBIGUOUS_SCORE,
                    method: ResolveMethod::Alias,
                })
            })
            .collect();
        sort_candidates(&mut candidates);
        candidates.truncate(self.config.max_candidates);

        let score = candidates.first().map_or(0.0, |c| c.score);
        Some(ResolverResult::NeedsConfirmation(BookConfirmation {
            input: input.to_string(),
            normalized_input: normalized.to_string(),
            score,
            method: ResolveMethod::Alias,
            candidates,
            reason: ConfirmationReason::AmbiguousAlias,
        }))
    }

    /// Fuzzy pass: score every book, rank, and gate on the thresholds.
    fn resolve_fuzzy(&self, input: &str, normalized: &str) -> ResolverResult {
        let tokens = tokenize(normalized);
        let input_ordinal = leading_ordinal(&tokens);
        let stripped = strip_leading_ordinal(&tokens);

        let mut scored: Vec<Candidate> = Vec::with_capacity(self.catalog.len());
        for (index, book) in self.catalog.books().iter().enumerate() {
            let keys = self.catalog.match_keys(index);
            let mut score = best_key_score(normalized, keys);

            match (input_ordinal, book.leading_ordinal()) {
                (Some(wanted), Some(actual)) if wanted != actual => {
                    score *= ORDINAL_MISMATCH_PENALTY;
                }
                (Some(_), None) => {
                    score *= MISSING_ORDINAL_PENALTY;
                    // A spurious ordinal must not bury a book that matches
                    // the remainder outright ("1 genesis" is still Genesis).
                    if !stripped.is_empty() {
                        let rescued =
                            best_key_score(&stripped, keys) * STRIPPED_ORDINAL_WEIGHT;
                        score = score.max(rescued);
                    }
                }
                _ => {}
            }

            scored.push(Candidate {
                book_id: book.id.clone(),
                book: book.clone(),
                score: clamp01(score),
                method: ResolveMethod::Fuzzy,
            });
        }

        sort_candidates(&mut scored);

        let top_score = scored.first().map_or(0.0, |c| c.score);
        if top_score <= 0.0 {
            return ResolverResult::NotFound(BookNotFound {
                input: input.to_string(),
                normalized_input: normalized.to_string(),
                candidates: Vec::new(),
                reason: NotFoundReason::NoCandidates,
            });
        }

        let second_score = scored.get(1).map(|c| c.score);
        let ambiguous = second_score.is_some_and(|second| {
            top_score >= AMBIGUOUS_SCORE_FLOOR
                && second >= AMBIGUOUS_SCORE_FLOOR
                && top_score - second <= AMBIGUOUS_SCORE_DELTA
        });

        let mut candidates = scored;
        candidates.truncate(self.config.max_candidates);

        if top_score >= AUTO_RESOLVE_MIN_SCORE && !ambiguous {
            let top = candidates[0].clone();
            return ResolverResult::Resolved(ResolvedBook {
                input: input.to_string(),
                normalized_input: normalized.to_string(),
                book_id: top.book_id,
                book: top.book,
                score: top.score,
                method: ResolveMethod::Fuzzy,
                candidates,
            });
        }

        ResolverResult::NeedsConfirmation(BookConfirmation {
            input: input.to_string(),
            normalized_input: normalized.to_string(),
            score: top_score,
            method: ResolveMethod::Fuzzy,
            candidates,
            reason: if ambiguous {
                ConfirmationReason::AmbiguousFuzzy
            } else {
                ConfirmationReason::LowConfidence
            },
        })
    }
}

/// Best score of a query against a book's pre-normalized match strings.
fn best_key_score(query: &str, keys: &[String]) -> f64 {
    let mut best = 0.0_f64;
    for key in keys {
        best = best.max(score_normalized_query(query, key));
        if best >= 1.0 {
            break;
        }
    }
    best
}

/// Sort by score descending, ties broken by book id ascending.
fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.book_id.cmp(&b.book_id))
    });
}
