//! Field name matching.
//!
//! A matcher pattern is either a plain name (exact, case-sensitive equality)
//! or `/pattern/flags`, a regular expression tested unanchored against the
//! name. Supported flags are `i` (case-insensitive), `m` (multi-line) and
//! `s` (dot matches newline); `g` is accepted and ignored.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::error::MatcherError;

/// Splits `/pattern/flags` into its parts.
static DELIMITED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^/(.+)/([A-Za-z]*)$").expect("Invalid delimited pattern regex")
});

/// Compiled field matcher.
#[derive(Debug, Clone)]
pub enum FieldMatcher {
    /// Exact name equality.
    Name(String),
    /// Regular expression search.
    Pattern(Regex),
    /// Matches nothing. Stands in for a pattern that failed to compile.
    Nothing,
}

impl FieldMatcher {
    /// Compile a matcher pattern.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError`] when a `/…/` pattern does not compile or
    /// carries an unsupported flag.
    pub fn parse(pattern: &str) -> Result<Self, MatcherError> {
        let Some(captures) = DELIMITED_PATTERN.captures(pattern) else {
            return Ok(FieldMatcher::Name(pattern.to_string()));
        };
        let expression = &captures[1];
        let flags = &captures[2];

        let mut builder = RegexBuilder::new(expression);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'g' => continue,
                other => {
                    return Err(MatcherError::UnsupportedFlag {
                        pattern: pattern.to_string(),
                        flag: other,
                    });
                }
            };
        }
        builder
            .build()
            .map(FieldMatcher::Pattern)
            .map_err(|source| MatcherError::InvalidPattern {
                pattern: pattern.to_string(),
                source: Box::new(source),
            })
    }

    /// Compile a matcher pattern, degrading to [`FieldMatcher::Nothing`] on error.
    pub fn parse_or_nothing(pattern: &str) -> Self {
        Self::parse(pattern).unwrap_or_else(|error| {
            tracing::warn!(%pattern, %error, "field matcher failed to compile");
            FieldMatcher::Nothing
        })
    }

    /// Test a field name.
    pub fn is_match(&self, name: &str) -> bool {
        match self {
            FieldMatcher::Name(expected) => expected == name,
            FieldMatcher::Pattern(regex) => regex.is_match(name),
            FieldMatcher::Nothing => false,
        }
    }

    /// Returns true for the degraded matcher.
    pub fn is_nothing(&self) -> bool {
        matches!(self, FieldMatcher::Nothing)
    }
}

/// Check a matcher pattern without keeping the compiled matcher.
///
/// # Errors
///
/// Returns the compile error for an invalid `/…/` pattern.
pub fn validate_pattern(pattern: &str) -> Result<(), MatcherError> {
    FieldMatcher::parse(pattern).map(|_| ())
}

/// Include/exclude rule applied to field names.
///
/// Exclude is evaluated first. A name passes when it is not excluded and
/// either no include is set or the include matches. A degraded include
/// keeps nothing; a degraded exclude drops everything.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    include: Option<FieldMatcher>,
    exclude: Option<FieldMatcher>,
}

impl NameFilter {
    /// Build a filter from optional patterns; empty ones are ignored.
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self::compile(include, exclude).0
    }

    /// Like [`NameFilter::new`], also returning the errors of patterns that
    /// degraded to [`FieldMatcher::Nothing`].
    pub fn compile(include: Option<&str>, exclude: Option<&str>) -> (Self, Vec<MatcherError>) {
        let mut errors = Vec::new();
        let mut compile = |pattern: Option<&str>| {
            let pattern = pattern.filter(|s| !s.is_empty())?;
            Some(FieldMatcher::parse(pattern).unwrap_or_else(|error| {
                tracing::warn!(%pattern, %error, "field matcher failed to compile");
                errors.push(error);
                FieldMatcher::Nothing
            }))
        };
        let include = compile(include);
        let exclude = compile(exclude);
        (Self { include, exclude }, errors)
    }

    pub fn passes(&self, name: &str) -> bool {
        if let Some(exclude) = &self.exclude
            && (exclude.is_nothing() || exclude.is_match(name))
        {
            return false;
        }
        self.include
            .as_ref()
            .is_none_or(|include| include.is_match(name))
    }
}
