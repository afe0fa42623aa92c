//! Core diff cleansing logic

use super::error::CleanseResult;
use super::ignore::{is_ignored, load_patterns_with, IgnorePattern, DEFAULT_IGNORE_FILE};
use super::lockfile::{is_lockfile, summarize_lockfile_diff};
use super::report::{build_cleansed_header, format_lockfile_block};
use super::types::{
    BlockDisposition, CleanseOutcome, CleansingSummary, DiffBlock, ExclusionRecord,
    LockfileSummary, EXCLUSION_REASON,
};
use prsieve_core::CleanseConfig;
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::{debug, info};

const DIFF_HEADER: &str = "diff --git ";

static DIFF_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^diff --git a/(.+?) b/(.+?)(?:\n|$)").expect("valid regex")
});

/// Inputs for one cleansing run besides the diff itself
#[derive(Debug, Clone)]
pub struct CleanseOptions {
    /// Directory holding the ignore file
    pub repo_root: PathBuf,
    pub ignore_file: String,
    pub extra_patterns: Vec<String>,
}

impl Default for CleanseOptions {
    fn default() -> Self {
        Self {
            repo_root: PathBuf::from("."),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            extra_patterns: Vec::new(),
        }
    }
}

impl CleanseOptions {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            ..Self::default()
        }
    }

    pub fn from_config(repo_root: impl Into<PathBuf>, config: &CleanseConfig) -> Self {
        Self {
            repo_root: repo_root.into(),
            ignore_file: config.ignore_file.clone(),
            extra_patterns: config.extra_patterns.clone(),
        }
    }

    pub fn load_patterns(&self) -> CleanseResult<Vec<IgnorePattern>> {
        load_patterns_with(&self.repo_root, &self.ignore_file, &self.extra_patterns)
    }
}

/// Split a multi-file unified diff into per-file blocks.
///
/// Text before the first header and blocks whose header cannot be parsed are
/// dropped.
pub fn split_diff_by_file(raw_diff: &str) -> Vec<DiffBlock> {
    split_on_headers(raw_diff)
        .into_iter()
        .filter_map(parse_block)
        .collect()
}

/// Cut at every newline that is immediately followed by a diff header.
/// The newline itself belongs to neither side.
fn split_on_headers(raw_diff: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start = 0;

    for (idx, _) in raw_diff.match_indices("\ndiff --git ") {
        blocks.push(&raw_diff[start..idx]);
        start = idx + 1;
    }
    blocks.push(&raw_diff[start..]);

    blocks
}

fn parse_block(block: &str) -> Option<DiffBlock> {
    let trimmed = block.trim();
    if !trimmed.starts_with(DIFF_HEADER) {
        return None;
    }

    let captures = DIFF_HEADER_RE.captures(trimmed)?;
    let old_path = captures.get(1)?.as_str().trim_end_matches('\r');
    let new_path = captures.get(2)?.as_str().trim_end_matches('\r');

    // a /dev/null post-change path marks a deletion
    let path = if new_path == "/dev/null" {
        old_path
    } else {
        new_path
    };

    Some(DiffBlock {
        path: path.to_string(),
        raw_block: block.to_string(),
    })
}

/// Decide how a file's block is carried into the cleansed diff
pub fn classify(path: &str, patterns: &[IgnorePattern]) -> BlockDisposition {
    if is_ignored(path, patterns) {
        BlockDisposition::Excluded
    } else if is_lockfile(path) {
        BlockDisposition::LockfileSummarized
    } else {
        BlockDisposition::PassedThrough
    }
}

/// Cleanse a raw diff using the ignore rules found under `options.repo_root`
pub fn cleanse_diff(raw_diff: &str, options: &CleanseOptions) -> CleanseResult<CleanseOutcome> {
    let patterns = options.load_patterns()?;
    Ok(cleanse_with_patterns(raw_diff, &patterns))
}

/// Cleanse a raw diff against an already loaded pattern set
pub fn cleanse_with_patterns(raw_diff: &str, patterns: &[IgnorePattern]) -> CleanseOutcome {
    let mut summary = CleansingSummary::default();
    let mut body_parts = Vec::new();

    for block in split_diff_by_file(raw_diff) {
        let path = block.path.replace('\\', "/");
        let disposition = classify(&path, patterns);
        debug!("{}: {}", path, disposition.as_str());

        match disposition {
            BlockDisposition::Excluded => {
                summary.excluded.push(ExclusionRecord {
                    path,
                    reason: EXCLUSION_REASON.to_string(),
                });
            }
            BlockDisposition::LockfileSummarized => {
                let text = summarize_lockfile_diff(&block.raw_block);
                body_parts.push(format_lockfile_block(&path, &text));
                summary.lockfile_summaries.push(LockfileSummary {
                    path,
                    summary: text,
                });
            }
            BlockDisposition::PassedThrough => body_parts.push(block.raw_block),
        }
    }

    info!(
        "cleansed diff: {} excluded, {} lockfiles summarised, {} passed through",
        summary.excluded.len(),
        summary.lockfile_summaries.len(),
        body_parts.len() - summary.lockfile_summaries.len()
    );

    let header = build_cleansed_header(&summary.excluded, &summary.lockfile_summaries);
    let cleansed_diff = [header, String::new(), body_parts.join("\n")].join("\n");

    CleanseOutcome {
        cleansed_diff,
        summary,
    }
}
