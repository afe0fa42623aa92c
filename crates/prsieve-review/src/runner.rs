use crate::error::ReviewResult;
use crate::github::GitHubClient;
use crate::openai::{extract_output_text, OpenAiClient};
use crate::prompt::{build_review_prompt, compose_comment_body, unwrap_whole_fence};
use crate::settings::ReviewSettings;
use prsieve_diff::{cleanse_diff, CleanseOptions, CleansingSummary};
use tracing::{info, warn};

/// What a review run produced
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub comment_body: String,
    pub cleansing: CleansingSummary,
    pub posted: bool,
}

/// Fetch the PR, cleanse its diff, ask the model for a review and post it.
///
/// With `dry_run` the comment is composed but not posted.
pub async fn run_review(
    settings: &ReviewSettings,
    cleanse: &CleanseOptions,
    dry_run: bool,
) -> ReviewResult<ReviewOutcome> {
    let github = GitHubClient::new(
        &settings.github_api_base,
        settings.repo.clone(),
        &settings.github_token,
    )?;
    let openai = OpenAiClient::new(&settings.openai_api_base, &settings.openai_api_key)?;

    let pr = github.get_pull_request(settings.issue_number).await?;
    let raw_diff = github.get_diff(settings.issue_number).await?;
    info!(
        "reviewing {}#{} ({} diff bytes)",
        settings.repo,
        settings.issue_number,
        raw_diff.len()
    );

    let cleansed = cleanse_diff(&raw_diff, cleanse)?;
    let prompt = build_review_prompt(&pr, &cleansed.cleansed_diff, settings.max_diff_chars);

    let response = openai.create_response(&settings.model, &prompt).await?;
    let text = extract_output_text(&response);
    if text.is_empty() {
        warn!(
            "OpenAI raw response (no extracted text): {}",
            serde_json::to_string_pretty(&response).unwrap_or_default()
        );
    }

    let comment_body = compose_comment_body(&unwrap_whole_fence(&text), &cleansed.summary);

    if !dry_run {
        github
            .post_comment(settings.issue_number, &comment_body)
            .await?;
        info!("AI review posted.");
    }

    Ok(ReviewOutcome {
        comment_body,
        cleansing: cleansed.summary,
        posted: !dry_run,
    })
}
