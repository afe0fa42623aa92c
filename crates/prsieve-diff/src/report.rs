//! Human-facing renderings of a cleansing run: the preamble placed at the top
//! of the cleansed diff, and the Markdown section posted on the pull request.

use super::types::{CleansingSummary, ExclusionRecord, LockfileSummary};

/// Excluded files listed in the PR comment before collapsing into a counter
pub const MAX_COMMENT_EXCLUSIONS: usize = 30;

/// Heading placed before each summarised lockfile in the cleansed diff body
pub fn format_lockfile_block(path: &str, summary: &str) -> String {
    format!("### [lockfile要約] {}\n{}\n", path, summary)
}

/// Build the explanatory header that precedes the cleansed diff body
pub fn build_cleansed_header(
    excluded: &[ExclusionRecord],
    lockfile_summaries: &[LockfileSummary],
) -> String {
    let mut lines = vec![
        "---".to_string(),
        "【AIレビュー用にクレンジング済み】".to_string(),
        "以下は .gitignore 除外・lockfile 要約適用後の diff です。".to_string(),
        String::new(),
    ];

    if !excluded.is_empty() {
        lines.push("### 除外したファイル（全文は渡していません）".to_string());
        for record in excluded {
            lines.push(format!("- `{}` ({})", record.path, record.reason));
        }
        lines.push(String::new());
    }

    if !lockfile_summaries.is_empty() {
        lines.push("### lockfile の扱い".to_string());
        lines.push(
            "lockfile の diff 全文は渡していません。以下の要約のみ AI 入力に含めています。"
                .to_string(),
        );
        for entry in lockfile_summaries {
            lines.push(format!("- `{}`: {}", entry.path, entry.summary));
        }
        lines.push(String::new());
    }

    lines.push("---".to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// Render a cleansing summary as the "AI Input Cleansing Summary" Markdown
/// section of a pull-request comment
pub fn format_cleansing_summary_for_comment(summary: &CleansingSummary) -> String {
    let mut parts = vec!["### AI Input Cleansing Summary".to_string(), String::new()];

    if summary.is_empty() {
        parts.push("除外・要約はありません（diff をそのまま AI に渡しています）。".to_string());
        return parts.join("\n");
    }

    let excluded = &summary.excluded;
    if !excluded.is_empty() {
        parts.push(format!("**除外したファイル: {} 件**", excluded.len()));
        parts.push(String::new());
        for record in excluded.iter().take(MAX_COMMENT_EXCLUSIONS) {
            parts.push(format!("- `{}` — {}", record.path, record.reason));
        }
        if excluded.len() > MAX_COMMENT_EXCLUSIONS {
            parts.push(format!(
                "- … 他 {} 件",
                excluded.len() - MAX_COMMENT_EXCLUSIONS
            ));
        }
        parts.push(String::new());
    }

    let lockfiles = &summary.lockfile_summaries;
    if !lockfiles.is_empty() {
        parts.push(format!(
            "**lockfile を要約して渡したファイル: {} 件**",
            lockfiles.len()
        ));
        parts.push(
            "（全文は渡さず、依存の追加・削除・更新の簡易要約のみ AI 入力に含めています）"
                .to_string(),
        );
        for entry in lockfiles {
            parts.push(format!("- `{}`: {}", entry.path, entry.summary));
        }
    }

    parts.join("\n")
}
