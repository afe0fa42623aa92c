//! Minimal GitHub REST client for the review flow

use crate::error::{ensure_success, ReviewResult};
use crate::settings::RepoSlug;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const SERVICE: &str = "GitHub";
const JSON_ACCEPT: &str = "application/vnd.github+json";
const DIFF_ACCEPT: &str = "application/vnd.github.v3.diff";

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
}

pub struct GitHubClient {
    http: Client,
    api_base: String,
    repo: RepoSlug,
    token: String,
}

impl GitHubClient {
    pub fn new(api_base: &str, repo: RepoSlug, token: &str) -> ReviewResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("prsieve/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            repo,
            token: token.to_string(),
        })
    }

    fn url(&self, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base, self.repo.owner, self.repo.name, tail
        )
    }

    fn authorized(&self, request: RequestBuilder, accept: &str) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, accept)
    }

    pub async fn get_pull_request(&self, number: u64) -> ReviewResult<PullRequest> {
        let url = self.url(&format!("pulls/{}", number));
        debug!("GET {}", url);
        let response = self
            .authorized(self.http.get(&url), JSON_ACCEPT)
            .send()
            .await?;
        Ok(ensure_success(response, SERVICE).await?.json().await?)
    }

    /// Fetch the pull request in unified diff representation
    pub async fn get_diff(&self, number: u64) -> ReviewResult<String> {
        let url = self.url(&format!("pulls/{}", number));
        debug!("GET {} (diff)", url);
        let response = self
            .authorized(self.http.get(&url), DIFF_ACCEPT)
            .send()
            .await?;
        Ok(ensure_success(response, SERVICE).await?.text().await?)
    }

    pub async fn post_comment(&self, number: u64, body: &str) -> ReviewResult<()> {
        let url = self.url(&format!("issues/{}/comments", number));
        debug!("POST {}", url);
        let response = self
            .authorized(self.http.post(&url), JSON_ACCEPT)
            .json(&json!({ "body": body }))
            .send()
            .await?;
        ensure_success(response, SERVICE).await?;
        Ok(())
    }
}
