//! Similarity scoring between a normalized query and catalog entries.
//!
//! The score blends two views of the same pair of strings: a normalized
//! Levenshtein similarity that is sensitive to typos within tokens, and a
//! token-set Jaccard similarity that is sensitive to word overlap in
//! multi-word names. Small prefix bonuses reward queries that are clean
//! truncations of a name ("lament" for "lamentations").

use std::collections::HashSet;

use crate::matching::normalize::tokenize;

/// Weight of the edit-distance similarity term
const STRING_WEIGHT: f64 = 0.65;

/// Weight of the token-set Jaccard term
const TOKEN_WEIGHT: f64 = 0.35;

/// Bonus when the candidate starts with the query (query length >= 4)
const QUERY_PREFIX_BONUS: f64 = 0.08;

/// Bonus when the query starts with the candidate (candidate length >= 4)
const CANDIDATE_PREFIX_BONUS: f64 = 0.04;

/// Clamp a score into [0, 1]; non-finite values collapse to 0.
#[must_use]
pub fn clamp01(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Normalized edit-distance similarity: `1 - distance / max_length`.
///
/// Returns 0 when either string is empty, 1 when they are equal.
#[must_use]
pub fn string_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    clamp01(strsim::normalized_levenshtein(a, b))
}

/// Jaccard similarity of the whitespace-token sets of two strings.
#[must_use]
pub fn token_jaccard_similarity(a: &str, b: &str) -> f64 {
    let left: HashSet<&str> = tokenize(a).into_iter().collect();
    let right: HashSet<&str> = tokenize(b).into_iter().collect();
    if left.is_empty() && right.is_empty() {
        return 0.0;
    }

    let intersection = left.intersection(&right).count();
    let union = left.len() + right.len() - intersection;
    if union > 0 {
        #[allow(clippy::cast_precision_loss)]
        {
            intersection as f64 / union as f64
        }
    } else {
        0.0
    }
}

/// Score a normalized query against one normalized candidate string.
///
/// Both inputs must already be normalized; the caller is responsible for
/// running them through [`normalize_book_query`](crate::matching::normalize::normalize_book_query).
#[must_use]
pub fn score_normalized_query(query: &str, candidate: &str) -> f64 {
    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }
    if query == candidate {
        return 1.0;
    }

    let string_score = string_similarity(query, candidate);
    let token_score = token_jaccard_similarity(query, candidate);

    let mut score = STRING_WEIGHT * string_score + TOKEN_WEIGHT * token_score;

    // Prefix bonuses only apply past trivial lengths so "ps" does not get a
    // head start against every p-book in the catalog.
    if query.len() >= 4 && candidate.starts_with(query) {
        score += QUERY_PREFIX_BONUS;
    } else if candidate.len() >= 4 && query.starts_with(candidate) {
        score += CANDIDATE_PREFIX_BONUS;
    }

    clamp01(score)
}
