use crate::runner::run_review;
use crate::settings::{RepoSlug, ReviewSettings};
use anyhow::{Context, Result};
use clap::Args;
use prsieve_core::{CleanseConfig, ReviewConfig};
use prsieve_diff::CleanseOptions;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ReviewArgs {
    /// Repository as owner/repo
    #[arg(long, env = "REPO")]
    pub repo: String,

    /// Pull request number
    #[arg(long, env = "ISSUE_NUMBER", value_parser = clap::value_parser!(u64).range(1..))]
    pub issue_number: u64,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    /// Model name (defaults to the configured model)
    #[arg(long, env = "OPENAI_MODEL")]
    pub model: Option<String>,

    /// Repository root holding the ignore file
    #[arg(long, default_value = ".")]
    pub repo_root: PathBuf,

    /// Print the comment instead of posting it
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: ReviewArgs, review: &ReviewConfig, cleanse: &CleanseConfig) -> Result<()> {
    let repo: RepoSlug = args.repo.parse()?;
    let settings = ReviewSettings::new(
        repo,
        args.issue_number,
        args.github_token,
        args.openai_api_key,
        args.model,
        review,
    );
    let options = CleanseOptions::from_config(args.repo_root, cleanse);

    let outcome = run_review(&settings, &options, args.dry_run)
        .await
        .with_context(|| format!("review of {}#{} failed", settings.repo, settings.issue_number))?;

    if !outcome.posted {
        println!("{}", outcome.comment_body);
    }
    Ok(())
}
