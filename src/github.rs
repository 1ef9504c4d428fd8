//! Commit metadata from the GitHub REST API.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::config::GithubConfig;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("commit lookup for {sha} failed: {source}")]
    Request {
        sha: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("commit lookup for {sha} returned HTTP {status}")]
    Status { sha: String, status: u16 },
}

/// What the report shows about the commit a run was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
    pub html_url: String,
    pub author_name: String,
    pub author_avatar_url: Option<String>,
    pub author_url: Option<String>,
    /// First line of the commit message.
    pub headline: String,
}

#[async_trait::async_trait]
pub trait CommitLookup: Send + Sync {
    /// `Ok(None)` when the hash does not resolve to a commit.
    async fn lookup(&self, sha: &str) -> Result<Option<CommitInfo>, LookupError>;
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    sha: String,
    html_url: String,
    commit: GitCommit,
    author: Option<GithubUser>,
}

#[derive(Debug, Deserialize)]
struct GitCommit {
    message: String,
    author: Option<GitSignature>,
}

#[derive(Debug, Deserialize)]
struct GitSignature {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
    avatar_url: Option<String>,
    html_url: Option<String>,
}

impl From<CommitResponse> for CommitInfo {
    fn from(response: CommitResponse) -> Self {
        let headline = response.commit.message.lines().next().unwrap_or_default().to_string();
        let signature_name = response.commit.author.map(|a| a.name);

        let (author_name, author_avatar_url, author_url) = match response.author {
            Some(user) => (signature_name.unwrap_or(user.login), user.avatar_url, user.html_url),
            None => (signature_name.unwrap_or_else(|| "unknown".to_string()), None, None),
        };

        Self {
            sha: response.sha,
            html_url: response.html_url,
            author_name,
            author_avatar_url,
            author_url,
            headline,
        }
    }
}

/// Looks commits up in one repository.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    api_url: String,
    repository: String,
}

impl GithubClient {
    pub fn new(client: Client, config: &GithubConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            repository: config.repository.clone(),
        }
    }
}

#[async_trait::async_trait]
impl CommitLookup for GithubClient {
    async fn lookup(&self, sha: &str) -> Result<Option<CommitInfo>, LookupError> {
        let url = format!("{}/repos/{}/commits/{}", self.api_url, self.repository, sha);
        tracing::debug!(%url, "Looking up commit");

        let request_error = |source| LookupError::Request {
            sha: sha.to_string(),
            source,
        };

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(request_error)?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
                tracing::info!(%sha, "Commit not found on GitHub");
                Ok(None)
            }
            status if status.is_success() => {
                let commit: CommitResponse = response.json().await.map_err(request_error)?;
                Ok(Some(commit.into()))
            }
            status => Err(LookupError::Status {
                sha: sha.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}
