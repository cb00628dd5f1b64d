//! Search term validation and pattern construction

use std::fmt;
use std::str::FromStr;

/// Hard cap on rows returned for any query
pub const MAX_RESULTS: usize = 20;

/// Outcome of validating the raw `term` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryDecision<'a> {
    /// Absent or zero-length: answer with an empty list
    Empty,
    /// Run the search with this exact term
    Proceed(&'a str),
}

impl<'a> QueryDecision<'a> {
    /// No trimming: a whitespace-only term proceeds to the search.
    pub fn from_raw(raw: Option<&'a str>) -> Self {
        match raw {
            Some(term) if !term.is_empty() => Self::Proceed(term),
            _ => Self::Empty,
        }
    }
}

/// How the term is anchored inside the searched fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// `%term%`
    #[default]
    Contains,
    /// `term%`, kept for clients written against the first releases
    Prefix,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contains" => Ok(Self::Contains),
            "prefix" | "starts_with" => Ok(Self::Prefix),
            other => Err(format!("unknown match mode {other:?}, expected contains or prefix")),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains => f.write_str("contains"),
            Self::Prefix => f.write_str("prefix"),
        }
    }
}

/// A validated, non-empty search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub mode: MatchMode,
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            term: term.into(),
            mode,
            limit: MAX_RESULTS,
        }
    }

    /// `LIKE` pattern for this query, used with `ESCAPE '\'`
    pub fn like_pattern(&self) -> String {
        let escaped = escape_like(&self.term);
        match self.mode {
            MatchMode::Contains => format!("%{escaped}%"),
            MatchMode::Prefix => format!("{escaped}%"),
        }
    }
}

/// Escape `LIKE` metacharacters so the term is matched literally
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_empty() {
        assert_eq!(QueryDecision::from_raw(None), QueryDecision::Empty);
        assert_eq!(QueryDecision::from_raw(Some("")), QueryDecision::Empty);
    }

    #[test]
    fn test_decision_whitespace_proceeds() {
        assert_eq!(
            QueryDecision::from_raw(Some("  ")),
            QueryDecision::Proceed("  ")
        );
        assert_eq!(
            QueryDecision::from_raw(Some(" ana ")),
            QueryDecision::Proceed(" ana ")
        );
    }

    #[test]
    fn test_like_pattern_by_mode() {
        let q = SearchQuery::new("30", MatchMode::Contains);
        assert_eq!(q.like_pattern(), "%30%");
        assert_eq!(q.limit, 20);

        let q = SearchQuery::new("30", MatchMode::Prefix);
        assert_eq!(q.like_pattern(), "30%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        let q = SearchQuery::new(r"50%_a\b", MatchMode::Contains);
        assert_eq!(q.like_pattern(), r"%50\%\_a\\b%");
    }

    #[test]
    fn test_match_mode_parse() {
        assert_eq!("contains".parse::<MatchMode>(), Ok(MatchMode::Contains));
        assert_eq!(" Prefix ".parse::<MatchMode>(), Ok(MatchMode::Prefix));
        assert_eq!("starts_with".parse::<MatchMode>(), Ok(MatchMode::Prefix));
        assert!("fuzzy".parse::<MatchMode>().is_err());
        assert_eq!(MatchMode::default().to_string(), "contains");
    }
}
