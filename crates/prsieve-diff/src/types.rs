//! Type definitions for diff cleansing

use serde::Serialize;

/// Reason recorded for every file dropped from the cleansed diff
pub const EXCLUSION_REASON: &str = ".gitignore or built-in rule";

/// One file's section of a multi-file unified diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffBlock {
    /// Post-change path, or the pre-change path for deletions
    pub path: String,
    /// Block text starting at its `diff --git` header
    pub raw_block: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusionRecord {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockfileSummary {
    pub path: String,
    pub summary: String,
}

/// Aggregate result of one cleansing run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleansingSummary {
    pub excluded: Vec<ExclusionRecord>,
    pub lockfile_summaries: Vec<LockfileSummary>,
}

impl CleansingSummary {
    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty() && self.lockfile_summaries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanseOutcome {
    pub cleansed_diff: String,
    pub summary: CleansingSummary,
}

/// How a single diff block is carried into the cleansed output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockDisposition {
    Excluded,
    LockfileSummarized,
    PassedThrough,
}

impl BlockDisposition {
    pub fn as_str(&self) -> &str {
        match self {
            BlockDisposition::Excluded => "excluded",
            BlockDisposition::LockfileSummarized => "lockfile-summarized",
            BlockDisposition::PassedThrough => "passed-through",
        }
    }
}
