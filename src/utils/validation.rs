//! Centralized validation helpers and resource-limit constants.

/// Maximum number of verses a single verse spec may expand to
pub const MAX_VERSES_PER_SPEC: usize = 10_000;

/// Maximum raw length of a reference string accepted by the parser
pub const MAX_REFERENCE_LENGTH: usize = 256;

/// Validate that a string is a canonical book id: 2-4 uppercase
/// alphanumeric characters ("JHN", "1SA").
///
/// # Examples
///
/// ```
/// use scripture_ref::utils::validation::is_canonical_book_id;
///
/// assert!(is_canonical_book_id("JHN"));
/// assert!(is_canonical_book_id("1SA"));
/// assert!(!is_canonical_book_id("john"));
/// assert!(!is_canonical_book_id("J"));
/// ```
#[must_use]
pub fn is_canonical_book_id(s: &str) -> bool {
    (2..=4).contains(&s.len())
        && s.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_book_ids() {
        for id in ["GEN", "1SA", "2CO", "PSA", "REV", "3JN"] {
            assert!(is_canonical_book_id(id), "{id} should be canonical");
        }
        for id in ["", "g", "gen", "GENESIS", "1 SA", "jn!"] {
            assert!(!is_canonical_book_id(id), "{id} should be rejected");
        }
    }
}
