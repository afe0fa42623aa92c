//! Review prompt construction and comment rendering

use crate::github::PullRequest;
use prsieve_diff::{format_cleansing_summary_for_comment, CleansingSummary};
use regex::Regex;
use std::sync::LazyLock;

/// Marker appended to a diff cut at the character limit
pub const TRUNCATION_MARKER: &str = "\n\n[TRUNCATED]\n";

/// Posted in place of the review when no text could be extracted
pub const REVIEW_FAILURE_MESSAGE: &str = "（AIレビュー生成に失敗しました：モデル出力テキストを抽出できませんでした。Actionsログの OpenAI raw response を確認してください）";

static WHOLE_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```[a-zA-Z0-9_-]*\n(.*?)\n```$").expect("valid regex")
});

/// Cut `text` to at most `max_chars` characters
pub fn trim_diff(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}{}", &text[..idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Strip a fence that wraps the entire reply; inner code blocks are kept
pub fn unwrap_whole_fence(text: &str) -> String {
    let trimmed = text.trim();
    match WHOLE_FENCE_RE.captures(trimmed).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str().trim().to_string(),
        None => trimmed.to_string(),
    }
}

pub fn build_review_prompt(pr: &PullRequest, diff: &str, max_diff_chars: usize) -> String {
    let body = pr
        .body
        .as_deref()
        .filter(|b| !b.is_empty())
        .unwrap_or("(なし)");

    format!(
        r#"あなたは熟練したソフトウェアエンジニアです。以下のPull Requestをレビューしてください。

## PRタイトル
{title}

## PR本文
{body}

## 変更差分（diff）
{diff}

観点:
- バグ/落とし穴（境界条件、例外、NULL、互換性）
- 保守性/可読性（命名、責務、重複）
- セキュリティ（ログ、入力検証、権限、情報漏えい）
- テスト観点（追加すべきテスト、確認ポイント）

トーン:
- 丁寧で建設的
- 不確かな点は推測と明記
- 初心者にも学びがある書き方

重要:
- 回答全体を ``` で囲まないでください。
- コードブロックは必要な箇所だけに使い、本文は通常のMarkdownとして出力してください。

出力はMarkdownでお願いします。"#,
        title = pr.title,
        body = body,
        diff = trim_diff(diff, max_diff_chars),
    )
    .trim()
    .to_string()
}

/// Assemble the PR comment: review text, cleansing summary, footer
pub fn compose_comment_body(review: &str, cleansing: &CleansingSummary) -> String {
    let review = review.trim();
    let review = if review.is_empty() {
        REVIEW_FAILURE_MESSAGE
    } else {
        review
    };

    format!(
        "### 🤖 AI Review\n\n{}\n\n{}\n\n---\n_Triggered by AI Review Action_",
        review,
        format_cleansing_summary_for_comment(cleansing)
    )
}
