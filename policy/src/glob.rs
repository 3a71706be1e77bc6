//! Single glob pattern as a match predicate.
//!
//! Patterns follow the usual shell-glob conventions: `*` stays within one
//! path segment, `**` spans directories, `[...]` character classes and
//! `{a,b}` brace groups are supported. A leading `!` negates the pattern
//! (an odd number of `!` negates, an even number cancels out).

use std::fmt;

use globset::GlobBuilder;

/// A compiled glob pattern, possibly negated.
///
/// Construction never fails. A pattern that does not compile, or a `#`
/// comment line, yields a matcher whose raw match is always `false`.
#[derive(Clone, Debug)]
pub struct GlobMatcher {
    pattern: String,
    negated: bool,
    matcher: Option<globset::GlobMatcher>,
}

impl GlobMatcher {
    pub fn new(pattern: &str) -> Self {
        if pattern.starts_with('#') {
            return Self {
                pattern: pattern.to_string(),
                negated: false,
                matcher: None,
            };
        }

        let body = pattern.trim_start_matches('!');
        let bangs = pattern.len() - body.len();
        let negated = bangs % 2 == 1;

        let matcher = match GlobBuilder::new(body)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
        {
            Ok(glob) => Some(glob.compile_matcher()),
            Err(err) => {
                tracing::warn!("glob pattern {pattern:?} does not compile and will not match: {err}");
                None
            }
        };

        Self {
            pattern: body.to_string(),
            negated,
            matcher,
        }
    }

    /// Whether `path` satisfies the pattern, after negation.
    pub fn is_match(&self, path: &str) -> bool {
        let raw = self
            .matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(path));
        raw != self.negated
    }

    /// The pattern without its negation prefix.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Whether the pattern compiled; `false` means it never raw-matches.
    pub fn is_valid(&self) -> bool {
        self.matcher.is_some()
    }
}

impl fmt::Display for GlobMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("!")?;
        }
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn star_does_not_cross_directories() {
        let glob = GlobMatcher::new("src/*.rs");
        assert!(glob.is_match("src/lib.rs"));
        assert!(!glob.is_match("src/nested/lib.rs"));
    }

    #[test]
    fn double_star_spans_directories() {
        let glob = GlobMatcher::new("apps/web-e2e-nightwatch/**/*");
        assert!(glob.is_match("apps/web-e2e-nightwatch/src/utils/apiUtils.ts"));
        assert!(glob.is_match("apps/web-e2e-nightwatch/README.md"));
        assert!(!glob.is_match("apps/web/src/containers/class/class.ts"));
    }

    #[test]
    fn brace_groups_and_classes() {
        let glob = GlobMatcher::new("docs/**/*.{md,rst}");
        assert!(glob.is_match("docs/guide/intro.md"));
        assert!(glob.is_match("docs/api.rst"));
        assert!(!glob.is_match("docs/api.txt"));

        let class = GlobMatcher::new("v[0-9].txt");
        assert!(class.is_match("v1.txt"));
        assert!(!class.is_match("va.txt"));
    }

    #[test]
    fn negation_inverts_the_raw_match() {
        let glob = GlobMatcher::new("!**/*.md");
        assert!(glob.is_negated());
        assert_eq!(glob.pattern(), "**/*.md");
        assert!(!glob.is_match("docs/readme.md"));
        assert!(glob.is_match("src/main.rs"));
    }

    #[test]
    fn double_negation_cancels() {
        let glob = GlobMatcher::new("!!*.md");
        assert!(!glob.is_negated());
        assert!(glob.is_match("readme.md"));
    }

    #[test]
    fn malformed_pattern_never_raw_matches() {
        let glob = GlobMatcher::new("src/[unclosed");
        assert!(!glob.is_valid());
        assert!(!glob.is_match("src/[unclosed"));
        assert!(!glob.is_match("anything"));
    }

    #[test]
    fn comment_pattern_matches_nothing() {
        let glob = GlobMatcher::new("# just a note");
        assert!(!glob.is_match("# just a note"));
        assert!(!glob.is_match("src/lib.rs"));
    }

    #[test]
    fn wildcards_match_dot_prefixed_names() {
        let glob = GlobMatcher::new("**/*");
        assert!(glob.is_match(".github/workflows/ci.yml"));
        assert!(glob.is_match("src/.hidden"));
        assert!(GlobMatcher::new("*.yml").is_match(".prettierrc.yml"));
    }

    #[test]
    fn display_keeps_negation_prefix() {
        assert_eq!(GlobMatcher::new("!src/**").to_string(), "!src/**");
        assert_eq!(GlobMatcher::new("src/**").to_string(), "src/**");
    }
}
