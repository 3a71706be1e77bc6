//! Path classification over a changed-file set.
//!
//! A [`MatchSpec`] groups globs into an `all` group (every changed file must
//! satisfy every glob) and an `any` group (at least one changed file must
//! satisfy at least one glob). Exclusions such as `!**/*.snap` belong in the
//! `all` group; in an `any` group a negated glob matches almost everything.
//!
//! The labeler uses match specs to decide which labels apply; the review
//! gate uses [`is_ignored`] to drop files from the changed-file count.

use serde::{Deserialize, Serialize};

use crate::glob::GlobMatcher;

/// Structured glob rule with optional `all` and `any` groups.
///
/// A spec with neither group populated matches trivially. A bare glob string
/// in configuration normalizes to `{ any: [glob] }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<Vec<String>>,
}

impl MatchSpec {
    /// Shorthand form: a single glob that any changed file may satisfy.
    pub fn glob(pattern: impl Into<String>) -> Self {
        Self {
            all: None,
            any: Some(vec![pattern.into()]),
        }
    }

    pub fn any_of<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            all: None,
            any: Some(patterns.into_iter().map(Into::into).collect()),
        }
    }

    pub fn all_of<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            all: Some(patterns.into_iter().map(Into::into).collect()),
            any: None,
        }
    }
}

fn compile(globs: &[String]) -> Vec<GlobMatcher> {
    globs.iter().map(|g| GlobMatcher::new(g)).collect()
}

/// A file satisfies an `all` group when every pattern in it holds.
fn file_matches_group(file: &str, matchers: &[GlobMatcher]) -> bool {
    tracing::debug!("    matching patterns against file {file}");
    for matcher in matchers {
        if !matcher.is_match(file) {
            tracing::debug!("    {matcher} did not match");
            return false;
        }
    }
    tracing::debug!("    all patterns matched");
    true
}

/// True if at least one file matches at least one glob in `globs`.
///
/// Empty `files` or empty `globs` never match.
pub fn matches_any<S: AsRef<str>>(files: &[S], globs: &[String]) -> bool {
    let matchers = compile(globs);
    tracing::debug!("  checking \"any\" patterns");
    for file in files {
        let file = file.as_ref();
        if let Some(matcher) = matchers.iter().find(|m| m.is_match(file)) {
            tracing::debug!("  {matcher} matched against {file}");
            return true;
        }
    }
    tracing::debug!("  \"any\" patterns did not match any files");
    false
}

/// True if every file satisfies every glob in `globs`.
///
/// Empty `files` match vacuously.
pub fn matches_all<S: AsRef<str>>(files: &[S], globs: &[String]) -> bool {
    let matchers = compile(globs);
    tracing::debug!("  checking \"all\" patterns");
    for file in files {
        let file = file.as_ref();
        if !file_matches_group(file, &matchers) {
            tracing::debug!("  \"all\" patterns did not match against {file}");
            return false;
        }
    }
    tracing::debug!("  \"all\" patterns matched all files");
    true
}

/// Evaluate both groups of `spec`; each present group must pass.
pub fn matches_spec<S: AsRef<str>>(files: &[S], spec: &MatchSpec) -> bool {
    if let Some(all) = &spec.all
        && !matches_all(files, all)
    {
        return false;
    }
    if let Some(any) = &spec.any
        && !matches_any(files, any)
    {
        return false;
    }
    true
}

/// True if any spec in `specs` matches. This is how a labeler rule with
/// several entries is applied.
pub fn matches_any_spec<S: AsRef<str>>(files: &[S], specs: &[MatchSpec]) -> bool {
    specs.iter().any(|spec| {
        tracing::debug!(" checking pattern {spec:?}");
        matches_spec(files, spec)
    })
}

/// True if `file` matches any single pattern in `ignore_globs`.
pub fn is_ignored(file: &str, ignore_globs: &[String]) -> bool {
    ignore_globs
        .iter()
        .any(|pattern| GlobMatcher::new(pattern).is_match(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globs(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(|p| (*p).to_string()).collect()
    }

    const NO_FILES: &[&str] = &[];

    #[test]
    fn any_matches_when_one_file_hits() {
        let files = ["README.md", "src/lib.rs"];
        assert!(matches_any(&files, &globs(&["src/**"])));
        assert!(!matches_any(&files, &globs(&["tests/**"])));
    }

    #[test]
    fn any_needs_only_one_glob_to_hit() {
        let files = ["src/lib.rs", "docs/guide.md"];
        assert!(matches_any(&files, &globs(&["tests/**", "**/*.md"])));
        assert!(!matches_any(&files, &globs(&["tests/**", "benches/**"])));
    }

    #[test]
    fn negated_glob_in_any_group_matches_other_files() {
        assert!(matches_any(&["src/lib.rs"], &globs(&["!**/*.md"])));
        assert!(!matches_any(&["README.md"], &globs(&["!**/*.md"])));
    }

    #[test]
    fn all_applies_negated_globs_to_every_file() {
        let files = ["src/lib.rs", "src/main.rs"];
        assert!(matches_all(&files, &globs(&["src/**", "!**/*.md"])));
        assert!(!matches_all(&["src/lib.rs", "src/notes.md"], &globs(&["src/**", "!**/*.md"])));
    }

    #[test]
    fn any_with_empty_inputs_is_false() {
        assert!(!matches_any(NO_FILES, &globs(&["**"])));
        assert!(!matches_any(&["src/lib.rs"], &[]));
    }

    #[test]
    fn all_requires_every_file() {
        let files = ["docs/a.md", "docs/b.md"];
        assert!(matches_all(&files, &globs(&["docs/**"])));
        assert!(!matches_all(&["docs/a.md", "src/lib.rs"], &globs(&["docs/**"])));
    }

    #[test]
    fn all_with_no_files_is_vacuously_true() {
        assert!(matches_all(NO_FILES, &globs(&["docs/**"])));
    }

    #[test]
    fn spec_with_both_groups_needs_both() {
        let spec = MatchSpec {
            all: Some(globs(&["!**/*.lock"])),
            any: Some(globs(&["src/**"])),
        };
        assert!(matches_spec(&["src/lib.rs", "README.md"], &spec));
        assert!(!matches_spec(&["src/lib.rs", "Cargo.lock"], &spec));
        assert!(!matches_spec(&["README.md"], &spec));
    }

    #[test]
    fn spec_with_only_all_ignores_any() {
        let spec = MatchSpec::all_of(["docs/**"]);
        assert!(matches_spec(&["docs/a.md"], &spec));
        assert!(matches_spec(NO_FILES, &spec));
    }

    #[test]
    fn empty_spec_matches_trivially() {
        assert!(matches_spec(&["anything"], &MatchSpec::default()));
        assert!(matches_spec(NO_FILES, &MatchSpec::default()));
    }

    #[test]
    fn shorthand_glob_is_an_any_group() {
        let spec = MatchSpec::glob("**/*.ts");
        assert_eq!(spec, MatchSpec::any_of(["**/*.ts"]));
        assert!(matches_spec(&["a.rs", "web/app.ts"], &spec));
    }

    #[test]
    fn any_spec_in_list_is_enough() {
        let specs = vec![MatchSpec::glob("docs/**"), MatchSpec::glob("src/**")];
        assert!(matches_any_spec(&["src/lib.rs"], &specs));
        assert!(!matches_any_spec(&["tests/it.rs"], &specs));
        assert!(!matches_any_spec(&["tests/it.rs"], &[]));
    }

    #[test]
    fn ignored_when_any_pattern_matches() {
        let ignore = globs(&["apps/web-e2e-nightwatch/**/*", "**/*.snap"]);
        assert!(is_ignored("apps/web-e2e-nightwatch/src/utils/apiUtils.ts", &ignore));
        assert!(is_ignored("src/__snapshots__/view.snap", &ignore));
        assert!(!is_ignored("apps/web/src/containers/class/class.ts", &ignore));
        assert!(!is_ignored("src/lib.rs", &[]));
    }
}
