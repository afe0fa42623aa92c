//! AI pull request review poster
//!
//! Fetches a pull request and its diff from GitHub, cleanses the diff with
//! `prsieve-diff`, asks the OpenAI Responses API for a review and posts the
//! result, together with the cleansing summary, as a PR comment.

mod cli;
mod error;
mod github;
mod openai;
mod prompt;
mod runner;
mod settings;

pub use cli::{run, ReviewArgs};
pub use error::{ReviewError, ReviewResult};
pub use github::{GitHubClient, PullRequest};
pub use openai::{extract_output_text, OpenAiClient};
pub use prompt::{
    build_review_prompt, compose_comment_body, trim_diff, unwrap_whole_fence,
    REVIEW_FAILURE_MESSAGE, TRUNCATION_MARKER,
};
pub use runner::{run_review, ReviewOutcome};
pub use settings::{RepoSlug, ReviewSettings};
