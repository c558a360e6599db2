use regex::Regex;
use thiserror::Error;

use crate::catalog::store::BookCatalog;
use crate::catalog::verse_counts::VerseCountIndex;
use crate::core::reference::ParsedReference;
use crate::matching::resolver::{
    BookResolver, Candidate, ResolvedBook, ResolverConfig, ResolverResult,
};
use crate::parsing::verse_spec::{parse_verse_spec, VerseSpecError};
use crate::utils::validation::MAX_REFERENCE_LENGTH;

/// Errors produced while parsing a reference
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Reference is required.")]
    EmptyInput,

    #[error("Reference is too long (max {MAX_REFERENCE_LENGTH} characters).")]
    InputTooLong,

    #[error(
        "Unable to parse reference \"{input}\". Try formats like \"John 3:16\", \"Ps 23\", or \"Matt 25:31-33,46\"."
    )]
    MalformedReference { input: String },

    #[error("Invalid chapter number: {value}")]
    InvalidChapter { value: String },

    #[error("Missing book name in reference \"{input}\". Example: \"John 3:16\".")]
    MissingBookName { input: String },

    #[error("{} only has {} chapter{}.", .book, .chapters, plural_s(.chapters))]
    ChapterOutOfRange { book: String, chapters: u32 },

    #[error(transparent)]
    VerseSpec(#[from] VerseSpecError),
}

fn plural_s(count: &u32) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}

/// Error returned by the convenience [`ReferenceParser::parse`] wrapper
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReferenceError {
    #[error("I couldn't confidently resolve \"{}\".{}", .book_part, suggestion_suffix(.suggestions))]
    Unresolved {
        /// The book-name fragment that failed to resolve
        book_part: String,
        /// Human-readable candidate suggestions ("1 Samuel (1SA)")
        suggestions: Vec<String>,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

fn suggestion_suffix(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" Did you mean: {}?", suggestions.join(", "))
    }
}

/// The structural pieces of a reference, before book resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceParts {
    /// Book-name fragment ("1 cor")
    pub book_part: String,

    /// 1-based chapter number
    pub chapter: u32,

    /// Raw verse fragment after the colon, if any ("31-33,46")
    pub verse_spec_raw: Option<String>,

    /// True when no chapter was written and chapter 1 was assumed ("John")
    pub assumed_chapter: bool,
}

/// A successful parse
#[derive(Debug, Clone)]
pub struct ParsedOk {
    /// Input after reference normalization
    pub normalized_input: String,

    /// The fully-resolved reference
    pub parsed: ParsedReference,

    /// How the book name resolved
    pub resolution: ResolvedBook,
}

/// A parse waiting on book disambiguation.
///
/// Carries everything an interactive session layer needs to re-enter the
/// parser once the user picks a candidate.
#[derive(Debug, Clone)]
pub struct PendingConfirmation {
    pub normalized_input: String,
    pub book_part: String,
    pub chapter: u32,
    pub verse_spec_raw: Option<String>,
    pub assumed_chapter: bool,

    /// The full resolver outcome (candidates, scores, reason)
    pub resolver: ResolverResult,

    /// Ready-to-render candidate labels ("1 Samuel (1SA)")
    pub suggestions: Vec<String>,
}

/// A failed parse
#[derive(Debug, Clone)]
pub struct ParseFailure {
    pub normalized_input: String,
    pub error: ParseError,
}

/// Outcome of a detailed parse call.
///
/// All three branches are ordinary return values; nothing here is an
/// exceptional condition. Use [`ReferenceParser::parse`] at call sites that
/// cannot drive a confirmation flow.
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Ok(ParsedOk),
    NeedsConfirmation(PendingConfirmation),
    Error(ParseFailure),
}

impl ParseOutcome {
    /// The parsed reference, when parsing fully succeeded.
    #[must_use]
    pub fn ok(&self) -> Option<&ParsedReference> {
        match self {
            Self::Ok(ok) => Some(&ok.parsed),
            _ => None,
        }
    }
}

/// Configuration for the reference parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum candidates carried on confirmation outcomes
    pub max_candidates: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_candidates: crate::matching::resolver::DEFAULT_MAX_CANDIDATES,
        }
    }
}

/// Parses free-text scripture references ("matt 25:31-33,46") into
/// [`ParsedReference`] values.
///
/// Splits the input structurally, resolves the book fragment through the
/// [`BookResolver`], validates the chapter against the verse-count index,
/// and parses the verse spec. Synchronous and side-effect free; safe to
/// share across concurrent callers.
pub struct ReferenceParser<'a> {
    verse_counts: &'a VerseCountIndex,
    resolver: BookResolver<'a>,

    /// Captures the trailing chapter digits and optional verse fragment.
    /// Book names never end in digits except through this chapter marker,
    /// so anchoring at the end is reliable in-domain.
    trailing_chapter: Regex,
}

impl<'a> ReferenceParser<'a> {
    /// Create a parser with default configuration.
    #[must_use]
    pub fn new(catalog: &'a BookCatalog, verse_counts: &'a VerseCountIndex) -> Self {
        Self::with_config(catalog, verse_counts, ParserConfig::default())
    }

    /// Create a parser with custom configuration.
    #[must_use]
    pub fn with_config(
        catalog: &'a BookCatalog,
        verse_counts: &'a VerseCountIndex,
        config: ParserConfig,
    ) -> Self {
        let resolver = BookResolver::with_config(
            catalog,
            ResolverConfig {
                max_candidates: config.max_candidates,
            },
        );

        Self {
            verse_counts,
            resolver,
            trailing_chapter: Regex::new(r"([0-9]+)(?::([0-9,\-\s]+))?\s*$")
                .expect("trailing chapter pattern is valid"),
        }
    }

    /// Parse a reference, returning the full tagged outcome.
    #[must_use]
    pub fn parse_detailed(&self, input: &str) -> ParseOutcome {
        if input.len() > MAX_REFERENCE_LENGTH {
            return ParseOutcome::Error(ParseFailure {
                normalized_input: String::new(),
                error: ParseError::InputTooLong,
            });
        }

        let normalized = normalize_reference_input(input);
        if normalized.is_empty() {
            return ParseOutcome::Error(ParseFailure {
                normalized_input: normalized,
                error: ParseError::EmptyInput,
            });
        }

        let parts = match self.split_parts(&normalized) {
            Ok(parts) => parts,
            Err(error) => {
                return ParseOutcome::Error(ParseFailure {
                    normalized_input: normalized,
                    error,
                })
            }
        };

        let resolved = self.resolver.resolve(&parts.book_part);
        log_resolve_event(&parts.book_part, &resolved);

        let resolution = match resolved {
            ResolverResult::Resolved(resolution) => resolution,
            other => {
                let suggestions = build_book_suggestions(other.candidates());
                return ParseOutcome::NeedsConfirmation(PendingConfirmation {
                    normalized_input: normalized,
                    book_part: parts.book_part,
                    chapter: parts.chapter,
                    verse_spec_raw: parts.verse_spec_raw,
                    assumed_chapter: parts.assumed_chapter,
                    resolver: other,
                    suggestions,
                });
            }
        };

        let max_chapters = self.verse_counts.chapter_count(&resolution.book_id);
        if max_chapters > 0 && parts.chapter > max_chapters {
            return ParseOutcome::Error(ParseFailure {
                normalized_input: normalized,
                error: ParseError::ChapterOutOfRange {
                    book: resolution.book.name.clone(),
                    chapters: max_chapters,
                },
            });
        }

        let verse_spec = match &parts.verse_spec_raw {
            Some(raw) => match parse_verse_spec(raw) {
                Ok(spec) => spec,
                Err(error) => {
                    return ParseOutcome::Error(ParseFailure {
                        normalized_input: normalized,
                        error: error.into(),
                    })
                }
            },
            None => None,
        };

        let parsed = ParsedReference::new(&resolution.book, parts.chapter, verse_spec);
        ParseOutcome::Ok(ParsedOk {
            normalized_input: normalized,
            parsed,
            resolution,
        })
    }

    /// Parse a reference, converting anything but full success into an error
    /// with a human-readable message (including "Did you mean" suggestions).
    pub fn parse(&self, input: &str) -> Result<ParsedReference, ReferenceError> {
        match self.parse_detailed(input) {
            ParseOutcome::Ok(ok) => Ok(ok.parsed),
            ParseOutcome::NeedsConfirmation(pending) => Err(ReferenceError::Unresolved {
                book_part: pending.book_part,
                suggestions: pending.suggestions,
            }),
            ParseOutcome::Error(failure) => Err(failure.error.into()),
        }
    }

    /// Split a normalized reference into book fragment, chapter, and raw
    /// verse spec, without resolving anything.
    pub fn split_parts(&self, normalized: &str) -> Result<ReferenceParts, ParseError> {
        let Some(caps) = self.trailing_chapter.captures(normalized) else {
            // No trailing chapter. A bare book name assumes chapter 1; a
            // colon with nothing parseable is malformed ("john 3:").
            if normalized.contains(':') {
                return Err(ParseError::MalformedReference {
                    input: normalized.to_string(),
                });
            }
            return Ok(ReferenceParts {
                book_part: normalized.to_string(),
                chapter: 1,
                verse_spec_raw: None,
                assumed_chapter: true,
            });
        };

        let chapter_raw = &caps[1];
        let chapter: u32 = chapter_raw.parse().map_err(|_| ParseError::InvalidChapter {
            value: chapter_raw.to_string(),
        })?;
        if chapter == 0 {
            return Err(ParseError::InvalidChapter {
                value: chapter_raw.to_string(),
            });
        }

        let match_start = caps.get(0).map_or(0, |m| m.start());
        let book_part = normalized[..match_start].trim();
        if book_part.is_empty() {
            return Err(ParseError::MissingBookName {
                input: normalized.to_string(),
            });
        }

        Ok(ReferenceParts {
            book_part: book_part.to_string(),
            chapter,
            verse_spec_raw: caps.get(2).map(|m| m.as_str().to_string()),
            assumed_chapter: false,
        })
    }
}

/// Normalize a raw reference string: collapse whitespace, unify unicode
/// dashes, strip periods.
#[must_use]
pub fn normalize_reference_input(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',
            other => other,
        })
        .filter(|&c| c != '.')
        .collect()
}

/// Unique, ready-to-render candidate labels for a confirmation prompt.
fn build_book_suggestions(candidates: &[Candidate]) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::new();
    let mut suggestions = Vec::new();

    for candidate in candidates {
        let id = candidate.book_id.as_str();
        if seen.contains(&id) {
            continue;
        }
        seen.push(id);
        suggestions.push(format!("{} ({})", candidate.book.name, id));
    }

    suggestions
}

fn log_resolve_event(book_part: &str, result: &ResolverResult) {
    let (kind, score) = match result {
        ResolverResult::Resolved(r) => ("resolved", r.score),
        ResolverResult::NeedsConfirmation(c) => ("needs_confirmation", c.score),
        ResolverResult::NotFound(_) => ("not_found", 0.0),
    };
    let top: Vec<&str> = result
        .candidates()
        .iter()
        .take(3)
        .map(|c| c.book_id.as_str())
        .collect();

    tracing::debug!(
        input = %book_part,
        normalized = %result.normalized_input(),
        kind,
        score,
        top = ?top,
        "book resolve"
    );
}
