//! Case-insensitive substring search over configured record fields.
//!
//! Stateless predicate combinator shared by client and delivery search,
//! each with its own field extractor. Matching preserves the original
//! collection order and never mutates the input.

use crate::error::{EngineError, Result};

/// A validated, lowercased search term.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    term: String,
}

impl SearchFilter {
    /// Build a filter from a raw query term.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] when the term is missing or
    /// blank.
    pub fn new(term: Option<&str>) -> Result<Self> {
        match term.map(str::trim) {
            Some(t) if !t.is_empty() => Ok(Self {
                term: t.to_lowercase(),
            }),
            _ => Err(EngineError::validation("search term is required")),
        }
    }

    /// The normalized term.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Whether any of the extracted field strings contains the term.
    #[must_use]
    pub fn matches<S: AsRef<str>>(&self, fields: &[S]) -> bool {
        fields
            .iter()
            .any(|f| f.as_ref().to_lowercase().contains(&self.term))
    }

    /// Keep the records whose extracted fields match, in original order.
    pub fn apply<T>(&self, records: Vec<T>, extract: impl Fn(&T) -> Vec<String>) -> Vec<T> {
        records
            .into_iter()
            .filter(|record| self.matches(&extract(record)))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_missing_or_blank_term() {
        assert!(matches!(
            SearchFilter::new(None),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            SearchFilter::new(Some("")),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            SearchFilter::new(Some("   ")),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let filter = SearchFilter::new(Some("ACme")).unwrap();
        assert!(filter.matches(&["Acme Freight"]));
        assert!(filter.matches(&["no", "contact@acme.example"]));
        assert!(!filter.matches(&["Globex"]));
    }

    #[test]
    fn test_apply_preserves_order() {
        let filter = SearchFilter::new(Some("a")).unwrap();
        let records = vec!["mars", "venus", "saturn", "pluto"];
        let matched = filter.apply(records, |r| vec![(*r).to_owned()]);
        assert_eq!(matched, ["mars", "saturn"]);
    }
}
