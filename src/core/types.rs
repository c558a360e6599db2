use serde::{Deserialize, Serialize};

/// Canonical identifier for a book in the catalog (e.g. "JHN", "1SA")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookId(pub String);

impl BookId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Which testament a book belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Testament {
    #[serde(rename = "OT")]
    Old,
    #[serde(rename = "NT")]
    New,
}

impl Testament {
    /// Parse a testament code ("OT"/"NT", case-insensitive)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "OT" => Some(Self::Old),
            "NT" => Some(Self::New),
            _ => None,
        }
    }
}

impl std::fmt::Display for Testament {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Old => write!(f, "OT"),
            Self::New => write!(f, "NT"),
        }
    }
}

/// How a book resolution was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveMethod {
    /// Exact hit in the alias index
    Alias,
    /// Similarity scoring against the whole catalog
    Fuzzy,
}

/// Why a resolution needs caller confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationReason {
    /// The input hit an alias shared by multiple books
    AmbiguousAlias,
    /// Two fuzzy candidates scored too close together
    AmbiguousFuzzy,
    /// The best fuzzy candidate scored below the auto-resolve floor
    LowConfidence,
}

/// Why no book was found at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundReason {
    /// Input was empty after normalization
    Empty,
    /// Nothing in the catalog scored above zero
    NoCandidates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testament_parse() {
        assert_eq!(Testament::parse("OT"), Some(Testament::Old));
        assert_eq!(Testament::parse(" nt "), Some(Testament::New));
        assert_eq!(Testament::parse("apocrypha"), None);
    }

    #[test]
    fn test_book_id_display() {
        assert_eq!(BookId::new("1SA").to_string(), "1SA");
    }

    #[test]
    fn test_testament_serde_codes() {
        assert_eq!(serde_json::to_string(&Testament::Old).unwrap(), "\"OT\"");
        assert_eq!(
            serde_json::from_str::<Testament>("\"NT\"").unwrap(),
            Testament::New
        );
    }
}
