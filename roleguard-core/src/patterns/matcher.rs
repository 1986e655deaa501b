//! Pattern matching utilities
//!
//! Plugin blocklist patterns are plain substrings compared without regard
//! to case. There are no wildcards: `*` and `?` are literal characters.

/// Result of matching a value against a pattern list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub matched: bool,
    /// The first pattern that matched, if any
    pub pattern: Option<String>,
}

/// Case-insensitive substring matcher
pub struct PatternMatcher;

impl PatternMatcher {
    /// Match a value against one pattern
    ///
    /// The pattern is used as given. An empty pattern matches every value;
    /// the sanitizer never stores one.
    pub fn matches(pattern: &str, value: &str) -> bool {
        value.to_lowercase().contains(&pattern.to_lowercase())
    }

    /// Match a value against a list of patterns, reporting the first hit
    pub fn match_any<S: AsRef<str>>(patterns: &[S], value: &str) -> MatchResult {
        let pattern = patterns
            .iter()
            .map(|pattern| pattern.as_ref())
            .find(|pattern| Self::matches(pattern, value))
            .map(str::to_string);
        MatchResult { matched: pattern.is_some(), pattern }
    }
}
