//! Name-based exclusion of record types and fields.
//!
//! An [`ExclusionFilter`] is compiled once from the configured patterns and
//! consulted before any other stage looks at a record type or field.
//! Patterns are unanchored and case-insensitive: a name is excluded when any
//! pattern matches anywhere inside it.

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::ProtomapError;

/// A compiled set of exclusion patterns.
///
/// # Examples
///
/// ```
/// use protomap::filter::ExclusionFilter;
///
/// let filter = ExclusionFilter::new(["debug", "^Internal"]).unwrap();
///
/// assert!(filter.is_excluded("DebugInfo"));
/// assert!(filter.is_excluded("InternalState"));
/// assert!(!filter.is_excluded("NotInternal"));
/// assert!(!filter.is_excluded("Person"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    patterns: Vec<Regex>,
}

impl ExclusionFilter {
    /// Compile exclusion patterns, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`ProtomapError::Pattern`] for the first pattern that is not a
    /// valid regular expression.
    pub fn new<I, S>(patterns: I) -> Result<Self, ProtomapError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ProtomapError::Pattern {
                        pattern: pattern.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(patterns = patterns.len(); "Compiled exclusion patterns");
        Ok(Self { patterns })
    }

    /// A filter that excludes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns `true` if any pattern matches somewhere inside `name`.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(name))
    }

    /// Returns `true` if the filter has no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_excludes_nothing() {
        let filter = ExclusionFilter::none();
        assert!(filter.is_empty());
        assert!(!filter.is_excluded("Anything"));
    }

    #[test]
    fn test_substring_match() {
        let filter = ExclusionFilter::new(["tmp"]).unwrap();
        assert!(filter.is_excluded("my_tmp_field"));
        assert!(!filter.is_excluded("temp"));
    }

    #[test]
    fn test_case_insensitive() {
        let filter = ExclusionFilter::new(["SECRET"]).unwrap();
        assert!(filter.is_excluded("secret_key"));
        assert!(filter.is_excluded("TopSecret"));
    }

    #[test]
    fn test_any_pattern_matches() {
        let filter = ExclusionFilter::new(["^a$", "zz"]).unwrap();
        assert!(filter.is_excluded("A"));
        assert!(filter.is_excluded("buzz"));
        assert!(!filter.is_excluded("ab"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = ExclusionFilter::new(["ok", "(unclosed"]).unwrap_err();
        match err {
            ProtomapError::Pattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("Expected Pattern error, got {other:?}"),
        }
    }
}
