use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("invalid repository '{0}': expected owner/repo")]
    InvalidRepo(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} API {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error(transparent)]
    Cleanse(#[from] prsieve_diff::CleanseError),
}

pub type ReviewResult<T> = Result<T, ReviewError>;

/// Turn a non-2xx response into [`ReviewError::Api`] carrying the body text
pub(crate) async fn ensure_success(
    response: reqwest::Response,
    service: &'static str,
) -> ReviewResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ReviewError::Api {
        service,
        status: status.as_u16(),
        body,
    })
}
