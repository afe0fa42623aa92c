//! Lockfile detection and diff summarisation
//!
//! Lockfile diffs are never forwarded verbatim. Instead the changed lines are
//! counted and package names are pulled out heuristically so the reviewer
//! sees which dependencies were added, removed or possibly bumped.

use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

/// Returned when there is no diff text to summarise
pub const NO_CONTENT_PLACEHOLDER: &str = "(lockfile: no diff content)";

const LOCKFILE_NAMES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Gemfile.lock",
    "Cargo.lock",
    "go.sum",
    "poetry.lock",
];

const MAX_LISTED_CHANGES: usize = 15;
const MAX_LISTED_UPDATES: usize = 10;

// package-lock.json: "node_modules/foo" or "node_modules/@scope/bar"
static NODE_MODULES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"node_modules/(@[^/]+/[^"'\s/]+|[^"'\s/]+)"#).expect("valid regex")
});

// package-lock.json object key: "foo": { or "@scope/bar": {
static JSON_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*[+-]\s*"(@[^/]+/[^"]+|[^"@]+)":\s*\{"#).expect("valid regex")
});

// yarn.lock entry header: foo@^1.0.0: or @scope/bar@^2.0.0:
static YARN_UNQUOTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]\s*(@[^/]+/[^@\s]+|[^@\s]+)@[^:]+:").expect("valid regex")
});

// quoted "package@version"
static QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(@[^/]+/[^"@]+|[^"@]+)@[^"]*""#).expect("valid regex")
});

/// Whether `path` names a dependency lockfile
pub fn is_lockfile(path: &str) -> bool {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    LOCKFILE_NAMES.contains(&base) || base.ends_with(".lock")
}

/// Pull a package name out of one changed lockfile line.
///
/// Rules are tried in a fixed order and the first hit wins, so a line yields
/// at most one name.
pub fn extract_package_name(line: &str) -> Option<&str> {
    [&NODE_MODULES_RE, &JSON_KEY_RE, &YARN_UNQUOTED_RE, &QUOTED_RE]
        .into_iter()
        .find_map(|re| re.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Line counts and package names gathered from one lockfile diff
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LockfileChanges {
    pub added_lines: usize,
    pub removed_lines: usize,
    pub added_packages: IndexSet<String>,
    pub removed_packages: IndexSet<String>,
}

impl LockfileChanges {
    pub fn scan(diff: &str) -> Self {
        let mut changes = Self::default();

        for line in diff.lines() {
            if line.starts_with('+') && !line.starts_with("+++") {
                changes.added_lines += 1;
                if let Some(name) = extract_package_name(line) {
                    changes.added_packages.insert(name.to_string());
                }
            } else if line.starts_with('-') && !line.starts_with("---") {
                changes.removed_lines += 1;
                if let Some(name) = extract_package_name(line) {
                    changes.removed_packages.insert(name.to_string());
                }
            }
        }

        changes
    }

    /// Names seen only on added lines, in first-seen order
    pub fn only_added(&self) -> Vec<&str> {
        self.added_packages
            .iter()
            .filter(|p| !self.removed_packages.contains(*p))
            .map(String::as_str)
            .collect()
    }

    /// Names seen only on removed lines, in first-seen order
    pub fn only_removed(&self) -> Vec<&str> {
        self.removed_packages
            .iter()
            .filter(|p| !self.added_packages.contains(*p))
            .map(String::as_str)
            .collect()
    }

    /// Names seen on both sides, most likely a version bump
    pub fn maybe_updated(&self) -> Vec<&str> {
        self.added_packages
            .iter()
            .filter(|p| self.removed_packages.contains(*p))
            .map(String::as_str)
            .collect()
    }

    pub fn render(&self) -> String {
        let mut parts = vec![format!(
            "{} 行追加, {} 行削除",
            self.added_lines, self.removed_lines
        )];

        let categories = [
            ("追加らしい依存", self.only_added(), MAX_LISTED_CHANGES),
            ("削除らしい依存", self.only_removed(), MAX_LISTED_CHANGES),
            ("更新の可能性", self.maybe_updated(), MAX_LISTED_UPDATES),
        ];
        for (label, names, cap) in categories {
            if !names.is_empty() {
                parts.push(format!("{}: {}", label, capped_list(&names, cap)));
            }
        }

        parts.join("。")
    }
}

fn capped_list(names: &[&str], cap: usize) -> String {
    let shown = names[..names.len().min(cap)].join(", ");
    if names.len() > cap {
        format!("{} …", shown)
    } else {
        shown
    }
}

/// Build a one-line summary of a lockfile diff
pub fn summarize_lockfile_diff(diff: &str) -> String {
    if diff.is_empty() {
        return NO_CONTENT_PLACEHOLDER.to_string();
    }
    LockfileChanges::scan(diff).render()
}
