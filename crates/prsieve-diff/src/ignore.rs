//! Simplified ignore-file matching
//!
//! Only a subset of ignore-file semantics is supported: directory names,
//! `*`/`**` globs and literal paths. Negation (`!pattern`) and anchoring
//! rules are not interpreted.

use crate::error::{CleanseError, CleanseResult};
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Default ignore file name looked up in the repository root
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Patterns that are always applied before the ignore file's own entries
pub const BUILTIN_PATTERNS: &[(&str, PatternKind)] = &[
    ("node_modules/", PatternKind::Dir),
    ("vendor/", PatternKind::Dir),
    ("*.lock", PatternKind::Glob),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Dir,
    Glob,
    Path,
}

impl PatternKind {
    /// Trailing `/` means a directory, any `*` a glob, anything else a path.
    pub fn infer(raw: &str) -> Self {
        if raw.ends_with('/') {
            PatternKind::Dir
        } else if raw.contains('*') {
            PatternKind::Glob
        } else {
            PatternKind::Path
        }
    }
}

/// A single ignore rule with its glob compiled up front
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    raw: String,
    kind: PatternKind,
    glob: Option<Regex>,
}

impl IgnorePattern {
    pub fn new(raw: &str) -> CleanseResult<Self> {
        Self::with_kind(raw, PatternKind::infer(raw))
    }

    pub fn with_kind(raw: &str, kind: PatternKind) -> CleanseResult<Self> {
        let glob = match kind {
            PatternKind::Dir => {
                let dir = dir_name(raw);
                if dir.contains('*') {
                    Some(glob_to_regex(dir)?)
                } else {
                    None
                }
            }
            PatternKind::Glob => Some(glob_to_regex(raw)?),
            PatternKind::Path => None,
        };

        Ok(Self {
            raw: raw.to_string(),
            kind,
            glob,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Match against a path already passed through [`normalize_path`].
    pub fn matches(&self, normalized: &str) -> bool {
        match self.kind {
            PatternKind::Dir => {
                let mut segments = normalized.split('/');
                match &self.glob {
                    Some(re) => segments.any(|s| re.is_match(s)),
                    None => {
                        let dir = dir_name(&self.raw);
                        segments.any(|s| {
                            s == dir
                                || s.strip_prefix(dir).is_some_and(|rest| rest.starts_with('.'))
                        })
                    }
                }
            }
            PatternKind::Glob => match &self.glob {
                Some(re) => re.is_match(normalized) || normalized.split('/').any(|s| re.is_match(s)),
                None => false,
            },
            PatternKind::Path => {
                normalized == self.raw
                    || normalized
                        .strip_prefix(self.raw.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

fn dir_name(raw: &str) -> &str {
    raw.strip_suffix('/').unwrap_or(raw)
}

/// Compile a glob where `**` spans separators and `*` stays within a segment.
/// The expression is anchored at the end only.
fn glob_to_regex(pattern: &str) -> CleanseResult<Regex> {
    let body = pattern
        .split("**")
        .map(|part| {
            part.split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join("[^/]*")
        })
        .collect::<Vec<_>>()
        .join(".*");

    Regex::new(&format!("{}$", body)).map_err(|source| CleanseError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Convert back-slashes to forward slashes and strip leading slashes
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches('/').to_string()
}

/// Extract pattern entries from ignore-file content.
///
/// Everything from the first `#` on a line is dropped, then the line is
/// trimmed; empty results are skipped.
pub fn parse_ignore_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Load the built-in patterns plus the entries of `<root_dir>/.gitignore`.
pub fn load_patterns(root_dir: &Path) -> CleanseResult<Vec<IgnorePattern>> {
    load_patterns_with(root_dir, DEFAULT_IGNORE_FILE, &[])
}

/// Load the built-in patterns, then `ignore_file` under `root_dir`, then `extra`.
///
/// A missing ignore file contributes no patterns.
pub fn load_patterns_with(
    root_dir: &Path,
    ignore_file: &str,
    extra: &[String],
) -> CleanseResult<Vec<IgnorePattern>> {
    let mut patterns = BUILTIN_PATTERNS
        .iter()
        .map(|(raw, kind)| IgnorePattern::with_kind(raw, *kind))
        .collect::<CleanseResult<Vec<_>>>()?;

    let path = root_dir.join(ignore_file);
    match fs::read_to_string(&path) {
        Ok(content) => {
            for raw in parse_ignore_lines(&content) {
                patterns.push(IgnorePattern::new(raw)?);
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no ignore file at {}", path.display());
        }
        Err(source) => return Err(CleanseError::ReadIgnoreFile { path, source }),
    }

    for raw in extra.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        patterns.push(IgnorePattern::new(raw)?);
    }

    debug!("loaded {} ignore patterns", patterns.len());
    Ok(patterns)
}

/// Check whether `path` is matched by any of `patterns`
pub fn is_ignored(path: &str, patterns: &[IgnorePattern]) -> bool {
    let normalized = normalize_path(path);
    patterns.iter().any(|p| p.matches(&normalized))
}
