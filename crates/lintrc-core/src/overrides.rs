//! Path-scoped overrides
//!
//! Override patterns are matched against the linted file's path relative to
//! the configuration directory, always with `/` separators. `*` and `?` never
//! cross a separator, `**/` spans zero or more directories, and a pattern
//! without any `/` also matches against the bare file name.

use glob::{MatchOptions, Pattern};
use std::path::{Component, Path, PathBuf};

use crate::config::merge::Layer;
use crate::error::LintrcError;
use crate::result::Result;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A compiled glob pattern together with its source text
///
/// Brace alternatives such as `*.{ts,tsx}` are expanded before compiling, so
/// one source pattern may hold several compiled alternatives.
#[derive(Debug, Clone)]
pub struct FilePattern {
    source: String,
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Clone)]
struct Alternative {
    pattern: Pattern,
    basename_only: bool,
}

impl FilePattern {
    /// Compile a pattern found at `field_path`
    pub fn compile(source: &str, field_path: &str) -> Result<Self> {
        let invalid = |reason: String| LintrcError::InvalidGlobPattern {
            pattern: source.to_string(),
            field_path: field_path.to_string(),
            reason,
        };

        if source.strip_prefix("./").unwrap_or(source).is_empty() {
            return Err(invalid("pattern is empty".to_string()));
        }
        if source.starts_with('!') {
            return Err(invalid("negated patterns are not supported".to_string()));
        }

        let expanded = expand_braces(source).map_err(invalid)?;
        let mut alternatives = Vec::with_capacity(expanded.len());
        for alternative in &expanded {
            let trimmed = alternative.strip_prefix("./").unwrap_or(alternative);
            if trimmed.is_empty() {
                return Err(invalid(format!("alternative '{alternative}' is empty")));
            }
            if trimmed.starts_with('/') {
                return Err(invalid(
                    "patterns must be relative to the configuration directory".to_string(),
                ));
            }
            if trimmed.split('/').any(|segment| segment == "..") {
                return Err(invalid(
                    "patterns cannot reach outside the configuration directory".to_string(),
                ));
            }

            let pattern = Pattern::new(trimmed).map_err(|e| invalid(e.to_string()))?;
            alternatives.push(Alternative {
                pattern,
                basename_only: !trimmed.contains('/'),
            });
        }

        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a normalised relative path
    pub fn matches(&self, relative: &str) -> bool {
        let basename = relative.rsplit('/').next().unwrap_or(relative);
        self.alternatives.iter().any(|alt| {
            alt.pattern.matches_with(relative, MATCH_OPTIONS)
                || (alt.basename_only && alt.pattern.matches_with(basename, MATCH_OPTIONS))
        })
    }
}

/// Expand `{a,b}` alternatives, innermost groups included, left to right
fn expand_braces(source: &str) -> std::result::Result<Vec<String>, String> {
    let Some(open) = source.find('{') else {
        if source.contains('}') {
            return Err("unbalanced '}'".to_string());
        }
        return Ok(vec![source.to_string()]);
    };
    if source[..open].contains('}') {
        return Err("unbalanced '}'".to_string());
    }

    let mut depth = 0usize;
    let mut close = None;
    let mut bounds = vec![open];
    for (offset, c) in source[open..].char_indices() {
        let index = open + offset;
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(index);
                    break;
                }
            }
            ',' if depth == 1 => bounds.push(index),
            _ => {}
        }
    }
    let close = close.ok_or_else(|| "unbalanced '{'".to_string())?;
    bounds.push(close);

    let prefix = &source[..open];
    let suffix = &source[close + 1..];
    let mut expanded = Vec::new();
    for window in bounds.windows(2) {
        let choice = &source[window[0] + 1..window[1]];
        expanded.extend(expand_braces(&format!("{prefix}{choice}{suffix}"))?);
    }
    Ok(expanded)
}

/// A validated override entry
#[derive(Debug, Clone)]
pub struct Override {
    origin: String,
    files: Vec<FilePattern>,
    excluded_files: Vec<FilePattern>,
    layer: Layer,
}

impl Override {
    pub fn new(
        origin: impl Into<String>,
        files: Vec<FilePattern>,
        excluded_files: Vec<FilePattern>,
        layer: Layer,
    ) -> Self {
        Self {
            origin: origin.into(),
            files,
            excluded_files,
            layer,
        }
    }

    /// Field path this override was declared at, e.g. `overrides[0]`
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn files(&self) -> &[FilePattern] {
        &self.files
    }

    pub fn excluded_files(&self) -> &[FilePattern] {
        &self.excluded_files
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Whether this override applies to a normalised relative path
    pub fn matches(&self, relative: &str) -> bool {
        self.files.iter().any(|p| p.matches(relative))
            && !self.excluded_files.iter().any(|p| p.matches(relative))
    }

    /// Pattern list rendered for messages
    pub fn describe_patterns(&self) -> String {
        self.files
            .iter()
            .map(FilePattern::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Compile every pattern of a list, naming each by index under `field_path`
pub fn compile_patterns(patterns: &[String], field_path: &str) -> Result<Vec<FilePattern>> {
    patterns
        .iter()
        .enumerate()
        .map(|(i, p)| FilePattern::compile(p, &format!("{field_path}[{i}]")))
        .collect()
}

/// Express `path` relative to `base_dir` with `/` separators
///
/// Relative paths are taken as already relative to `base_dir`. Returns `None`
/// when the path lies outside `base_dir`; overrides never apply to such files.
pub fn relative_path(path: &Path, base_dir: &Path) -> Option<String> {
    let normalized;
    let relative = if path.is_absolute() {
        normalized = normalize_path(path);
        normalized.strip_prefix(normalize_path(base_dir)).ok()?
    } else {
        path
    };

    let mut segments: Vec<String> = Vec::new();
    for component in relative.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => segments.push(part.to_string_lossy().replace('\\', "/")),
            Component::ParentDir => {
                segments.pop()?;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// Lexically resolve `.` and `..` components without touching the filesystem
///
/// `..` at the root stays at the root.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() && !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(source: &str) -> FilePattern {
        FilePattern::compile(source, "overrides[0].files[0]").unwrap()
    }

    #[test]
    fn test_double_star_matches_zero_directories() {
        let p = pattern("tests/**/*.js");
        assert!(p.matches("tests/foo.test.js"));
        assert!(p.matches("tests/unit/deep/foo.js"));
        assert!(!p.matches("src/foo.js"));
        assert!(!p.matches("tests/foo.ts"));
    }

    #[test]
    fn test_leading_double_star() {
        let p = pattern("**/*.test.js");
        assert!(p.matches("foo.test.js"));
        assert!(p.matches("src/a/b/foo.test.js"));
        assert!(!p.matches("src/foo.js"));
    }

    #[test]
    fn test_star_does_not_cross_separator() {
        let p = pattern("src/*.js");
        assert!(p.matches("src/index.js"));
        assert!(!p.matches("src/lib/index.js"));
    }

    #[test]
    fn test_slashless_pattern_matches_basename() {
        let p = pattern("*.spec.js");
        assert!(p.matches("deep/nested/foo.spec.js"));
        assert!(!p.matches("deep/nested/foo.js"));
    }

    #[test]
    fn test_dot_slash_prefix_is_ignored() {
        let p = pattern("./scripts/*.js");
        assert!(p.matches("scripts/build.js"));
        assert_eq!(p.as_str(), "./scripts/*.js");
    }

    #[test]
    fn test_invalid_patterns() {
        for bad in ["", "/abs/*.js", "../outside/*.js", "!negated.js", "src/[a-.js"] {
            let err = FilePattern::compile(bad, "overrides[2].files[1]").unwrap_err();
            assert!(matches!(err, LintrcError::InvalidGlobPattern { .. }), "{bad}");
            assert_eq!(err.field_path(), Some("overrides[2].files[1]"));
        }
    }

    #[test]
    fn test_brace_alternatives() {
        let p = pattern("**/*.{ts,tsx}");
        assert!(p.matches("src/a.ts"));
        assert!(p.matches("src/deep/a.tsx"));
        assert!(!p.matches("src/a.js"));

        let p = pattern("{src,lib}/**/*.{js,mjs}");
        assert!(p.matches("src/index.js"));
        assert!(p.matches("lib/util/a.mjs"));
        assert!(!p.matches("tests/a.js"));
        assert_eq!(p.as_str(), "{src,lib}/**/*.{js,mjs}");

        let p = pattern("*.{spec,test}.{js,ts}");
        assert!(p.matches("deep/foo.test.ts"));
        assert!(p.matches("foo.spec.js"));
    }

    #[test]
    fn test_nested_brace_alternatives() {
        let p = pattern("src/{a,b{1,2}}/*.js");
        assert!(p.matches("src/a/x.js"));
        assert!(p.matches("src/b2/x.js"));
        assert!(!p.matches("src/b/x.js"));
    }

    #[test]
    fn test_unbalanced_braces_are_rejected() {
        for bad in ["**/*.{ts,tsx", "**/*.ts}", "{../up,src}/*.js", "{,}"] {
            let err = FilePattern::compile(bad, "overrides[1].files[0]").unwrap_err();
            assert!(matches!(err, LintrcError::InvalidGlobPattern { .. }), "{bad}");
            assert_eq!(err.field_path(), Some("overrides[1].files[0]"));
        }
    }

    #[test]
    fn test_compile_patterns_indexes_field_path() {
        let patterns = vec!["ok/*.js".to_string(), "bad/[".to_string()];
        let err = compile_patterns(&patterns, "overrides[3].excludedFiles").unwrap_err();
        assert_eq!(err.field_path(), Some("overrides[3].excludedFiles[1]"));
    }

    #[test]
    fn test_excluded_files_remove_match() {
        let ov = Override::new(
            "overrides[0]",
            vec![pattern("tests/**/*.js")],
            vec![pattern("tests/fixtures/**")],
            Layer::default(),
        );
        assert!(ov.matches("tests/unit/a.js"));
        assert!(!ov.matches("tests/fixtures/a.js"));
    }

    #[test]
    fn test_relative_path() {
        let base = PathBuf::from("/project");
        assert_eq!(
            relative_path(Path::new("/project/tests/foo.test.js"), &base).as_deref(),
            Some("tests/foo.test.js")
        );
        assert_eq!(
            relative_path(Path::new("./src/foo.js"), &base).as_deref(),
            Some("src/foo.js")
        );
        assert_eq!(
            relative_path(Path::new("src/../lib/a.js"), &base).as_deref(),
            Some("lib/a.js")
        );
        assert_eq!(
            relative_path(Path::new("/project/../project/src/a.js"), &base).as_deref(),
            Some("src/a.js")
        );
        assert_eq!(
            relative_path(Path::new("/project/src/./a.js"), Path::new("/work/../project"))
                .as_deref(),
            Some("src/a.js")
        );
        assert_eq!(relative_path(Path::new("/project/../elsewhere/a.js"), &base), None);
        assert_eq!(relative_path(Path::new("/elsewhere/a.js"), &base), None);
        assert_eq!(relative_path(Path::new("../a.js"), &base), None);
    }
}
