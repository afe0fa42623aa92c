//! Pull request diff cleansing for LLM review input
//!
//! A raw multi-file diff is split per file; files matched by the ignore rules
//! are dropped, lockfiles are reduced to a one-line dependency summary, and
//! everything else passes through untouched. The result is a cleansed diff
//! with an explanatory header plus a structured summary for the PR comment.

mod cleanser;
mod cli;
mod error;
mod ignore;
mod lockfile;
mod report;
mod types;

pub use cleanser::{
    classify, cleanse_diff, cleanse_with_patterns, split_diff_by_file, CleanseOptions,
};
pub use cli::{run, CleanseArgs, OutputFormat};
pub use error::{CleanseError, CleanseResult};
pub use ignore::{
    is_ignored, load_patterns, load_patterns_with, normalize_path, parse_ignore_lines,
    IgnorePattern, PatternKind, BUILTIN_PATTERNS, DEFAULT_IGNORE_FILE,
};
pub use lockfile::{
    extract_package_name, is_lockfile, summarize_lockfile_diff, LockfileChanges,
    NO_CONTENT_PLACEHOLDER,
};
pub use report::{
    build_cleansed_header, format_cleansing_summary_for_comment, format_lockfile_block,
    MAX_COMMENT_EXCLUSIONS,
};
pub use types::{
    BlockDisposition, CleanseOutcome, CleansingSummary, DiffBlock, ExclusionRecord,
    LockfileSummary, EXCLUSION_REASON,
};

#[cfg(test)]
mod tests;
