use thiserror::Error;

use crate::core::reference::{VerseRange, VerseSpec};
use crate::utils::validation::MAX_VERSES_PER_SPEC;

/// Errors produced while parsing a verse specification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerseSpecError {
    #[error("Invalid verse number: {0}")]
    InvalidNumber(String),

    #[error("Invalid verse range: \"{0}\". Use formats like 16, 16-18, or 31-33,46.")]
    InvalidRangeFormat(String),

    #[error("Invalid verse range: {0}")]
    InvalidRangeValue(String),

    #[error("Verse range must be ascending: {0}")]
    DescendingRange(String),

    #[error("Verse specification expands to more than {MAX_VERSES_PER_SPEC} verses.")]
    TooManyVerses,
}

/// Parse a verse specification: a comma-separated list of single verses and
/// ascending ranges ("31-33,46").
///
/// Whitespace is stripped before splitting. Returns `Ok(None)` when nothing
/// parseable remains (empty input, or only empty entries like ","), which
/// callers treat as "whole chapter".
///
/// The returned [`VerseSpec`] carries the expanded verse list in first-seen
/// order with duplicates removed, the ranges as written, and a canonical
/// spec string re-rendered from those ranges (a degenerate `n-n` range
/// collapses to `n`).
///
/// # Examples
///
/// ```
/// use scripture_ref::parsing::verse_spec::parse_verse_spec;
///
/// let spec = parse_verse_spec("31-33, 46").unwrap().unwrap();
/// assert_eq!(spec.spec, "31-33,46");
/// assert_eq!(spec.verses, vec![31, 32, 33, 46]);
///
/// assert!(parse_verse_spec("").unwrap().is_none());
/// assert!(parse_verse_spec("10-5").is_err());
/// ```
pub fn parse_verse_spec(raw: &str) -> Result<Option<VerseSpec>, VerseSpecError> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = cleaned.split(',').filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        return Ok(None);
    }

    let mut ranges: Vec<VerseRange> = Vec::new();
    let mut verses: Vec<u32> = Vec::new();
    let mut push_verse = |verses: &mut Vec<u32>, value: u32| {
        if !verses.contains(&value) {
            verses.push(value);
        }
    };

    for part in parts {
        if part.chars().all(|c| c.is_ascii_digit()) {
            let value: u32 = part
                .parse()
                .map_err(|_| VerseSpecError::InvalidNumber(part.to_string()))?;
            if value == 0 {
                return Err(VerseSpecError::InvalidNumber(part.to_string()));
            }

            ranges.push(VerseRange::new(value, value));
            push_verse(&mut verses, value);
            continue;
        }

        let Some((start_raw, end_raw)) = part.split_once('-') else {
            return Err(VerseSpecError::InvalidRangeFormat(part.to_string()));
        };
        if start_raw.is_empty()
            || end_raw.is_empty()
            || !start_raw.chars().all(|c| c.is_ascii_digit())
            || !end_raw.chars().all(|c| c.is_ascii_digit())
        {
            return Err(VerseSpecError::InvalidRangeFormat(part.to_string()));
        }

        let start: u32 = start_raw
            .parse()
            .map_err(|_| VerseSpecError::InvalidRangeValue(part.to_string()))?;
        let end: u32 = end_raw
            .parse()
            .map_err(|_| VerseSpecError::InvalidRangeValue(part.to_string()))?;
        if start == 0 || end == 0 {
            return Err(VerseSpecError::InvalidRangeValue(part.to_string()));
        }
        if end < start {
            return Err(VerseSpecError::DescendingRange(part.to_string()));
        }
        if u64::from(end - start) + verses.len() as u64 >= MAX_VERSES_PER_SPEC as u64 {
            return Err(VerseSpecError::TooManyVerses);
        }

        ranges.push(VerseRange::new(start, end));
        for verse in start..=end {
            push_verse(&mut verses, verse);
        }
    }

    // Canonical display form, re-rendered from the parsed ranges.
    let spec = ranges
        .iter()
        .map(|range| {
            if range.start == range.end {
                range.start.to_string()
            } else {
                format!("{}-{}", range.start, range.end)
            }
        })
        .collect::<Vec<_>>()
        .join(",");

    Ok(Some(VerseSpec {
        spec,
        verses,
        ranges,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_verse() {
        let spec = parse_verse_spec("16").unwrap().unwrap();
        assert_eq!(spec.spec, "16");
        assert_eq!(spec.verses, vec![16]);
        assert_eq!(spec.ranges, vec![VerseRange::new(16, 16)]);
    }

    #[test]
    fn test_range_and_single_combined() {
        let spec = parse_verse_spec("31-33,46").unwrap().unwrap();
        assert_eq!(spec.spec, "31-33,46");
        assert_eq!(spec.verses, vec![31, 32, 33, 46]);
        assert_eq!(
            spec.ranges,
            vec![VerseRange::new(31, 33), VerseRange::new(46, 46)]
        );
    }

    #[test]
    fn test_whitespace_is_stripped() {
        let spec = parse_verse_spec(" 4 - 7 , 9 ").unwrap().unwrap();
        assert_eq!(spec.spec, "4-7,9");
        assert_eq!(spec.verses, vec![4, 5, 6, 7, 9]);
    }

    #[test]
    fn test_duplicates_removed_first_seen_order() {
        let spec = parse_verse_spec("5,3-6").unwrap().unwrap();
        assert_eq!(spec.verses, vec![5, 3, 4, 6]);
        // The spec string preserves the ranges as written.
        assert_eq!(spec.spec, "5,3-6");
    }

    #[test]
    fn test_degenerate_range_collapses() {
        let spec = parse_verse_spec("7-7").unwrap().unwrap();
        assert_eq!(spec.spec, "7");
        assert_eq!(spec.verses, vec![7]);
        assert_eq!(spec.ranges, vec![VerseRange::new(7, 7)]);
    }

    #[test]
    fn test_empty_inputs_yield_none() {
        assert!(parse_verse_spec("").unwrap().is_none());
        assert!(parse_verse_spec("   ").unwrap().is_none());
        assert!(parse_verse_spec(",").unwrap().is_none());
        assert!(parse_verse_spec(",,,").unwrap().is_none());
    }

    #[test]
    fn test_zero_verse_rejected() {
        assert_eq!(
            parse_verse_spec("0"),
            Err(VerseSpecError::InvalidNumber("0".to_string()))
        );
        assert_eq!(
            parse_verse_spec("0-5"),
            Err(VerseSpecError::InvalidRangeValue("0-5".to_string()))
        );
    }

    #[test]
    fn test_descending_range_rejected() {
        assert_eq!(
            parse_verse_spec("10-5"),
            Err(VerseSpecError::DescendingRange("10-5".to_string()))
        );
    }

    #[test]
    fn test_malformed_entries_rejected() {
        assert!(matches!(
            parse_verse_spec("16-"),
            Err(VerseSpecError::InvalidRangeFormat(_))
        ));
        assert!(matches!(
            parse_verse_spec("-16"),
            Err(VerseSpecError::InvalidRangeFormat(_))
        ));
        assert!(matches!(
            parse_verse_spec("1-2-3"),
            Err(VerseSpecError::InvalidRangeFormat(_))
        ));
        assert!(matches!(
            parse_verse_spec("a-b"),
            Err(VerseSpecError::InvalidRangeFormat(_))
        ));
    }

    #[test]
    fn test_expansion_cap() {
        assert_eq!(
            parse_verse_spec("1-2000000000"),
            Err(VerseSpecError::TooManyVerses)
        );
    }

    #[test]
    fn test_canonical_form_is_stable() {
        for input in ["16", "16-18", "31-33,46", "1,3,5-9"] {
            let spec = parse_verse_spec(input).unwrap().unwrap();
            assert_eq!(spec.spec, input);
            // Re-parsing the canonical form reproduces it.
            let reparsed = parse_verse_spec(&spec.spec).unwrap().unwrap();
            assert_eq!(reparsed, spec);
        }
    }
}
