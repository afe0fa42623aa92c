//! Review run settings, resolved once at the CLI boundary

use crate::error::ReviewError;
use prsieve_core::ReviewConfig;
use std::fmt;
use std::str::FromStr;

/// `owner/repo` pair identifying a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(RepoSlug {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ReviewError::InvalidRepo(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone)]
pub struct ReviewSettings {
    pub repo: RepoSlug,
    pub issue_number: u64,
    pub github_token: String,
    pub openai_api_key: String,
    pub model: String,
    pub max_diff_chars: usize,
    pub github_api_base: String,
    pub openai_api_base: String,
}

impl ReviewSettings {
    /// Combine the required credentials with the configured endpoints and
    /// model. An explicit `model` takes precedence over the config.
    pub fn new(
        repo: RepoSlug,
        issue_number: u64,
        github_token: String,
        openai_api_key: String,
        model: Option<String>,
        config: &ReviewConfig,
    ) -> Self {
        Self {
            repo,
            issue_number,
            github_token,
            openai_api_key,
            model: model.unwrap_or_else(|| config.model.clone()),
            max_diff_chars: config.max_diff_chars,
            github_api_base: config.github_api_base.clone(),
            openai_api_base: config.openai_api_base.clone(),
        }
    }
}
