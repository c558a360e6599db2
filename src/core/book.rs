use serde::{Deserialize, Serialize};

use crate::core::types::{BookId, Testament};

/// A canonical book in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier (2-4 uppercase characters)
    pub id: BookId,

    /// Human-readable display name ("1 Samuel")
    pub name: String,

    /// Testament this book belongs to
    pub testament: Testament,

    /// Name form used by the upstream text-lookup service
    pub api_name: String,

    /// Accepted free-text synonyms (abbreviations, alternate spellings)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Book {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        testament: Testament,
        api_name: impl Into<String>,
    ) -> Self {
        Self {
            id: BookId::new(id),
            name: name.into(),
            testament,
            api_name: api_name.into(),
            aliases: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    /// The leading ordinal of the display name, if any ("2 Kings" -> 2).
    ///
    /// Only 1-3 count: no canonical book carries a higher ordinal, and the
    /// fuzzy scorer uses this to penalize ordinal mismatches.
    #[must_use]
    pub fn leading_ordinal(&self) -> Option<u8> {
        let mut chars = self.name.chars();
        let first = chars.next()?;
        let ordinal = match first {
            '1' => 1,
            '2' => 2,
            '3' => 3,
            _ => return None,
        };
        if chars.next() == Some(' ') {
            Some(ordinal)
        } else {
            None
        }
    }

    /// Every string an input may be matched against: id, display name,
    /// API name, and declared aliases.
    pub fn match_candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str())
            .chain(std::iter::once(self.name.as_str()))
            .chain(std::iter::once(self.api_name.as_str()))
            .chain(self.aliases.iter().map(String::as_str))
    }
}
