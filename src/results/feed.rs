//! Fetching run sequences from the published results feeds.

use std::fmt;
use std::str::FromStr;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::RunSequence;
use crate::config::FeedsConfig;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} returned malformed results: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The two results feeds, one per command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feed {
    Test262,
    Wasm,
}

impl Feed {
    pub const ALL: [Feed; 2] = [Feed::Test262, Feed::Wasm];

    /// Name the command is invoked by.
    pub fn command_name(&self) -> &'static str {
        match self {
            Feed::Test262 => "test262",
            Feed::Wasm => "wasm",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Feed::Test262 => "LibJS test262 results",
            Feed::Wasm => "LibWasm spec test results",
        }
    }

    pub fn url<'a>(&self, feeds: &'a FeedsConfig) -> &'a str {
        match self {
            Feed::Test262 => &feeds.test262_url,
            Feed::Wasm => &feeds.wasm_url,
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command_name())
    }
}

impl FromStr for Feed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feed::ALL
            .into_iter()
            .find(|feed| feed.command_name() == s)
            .ok_or_else(|| format!("unknown command: {}", s))
    }
}

/// Anything that can produce the run sequence for a feed.
#[async_trait::async_trait]
pub trait ResultSource: Send + Sync {
    async fn fetch(&self, feed: Feed) -> Result<RunSequence, FetchError>;
}

/// Fetches feeds over HTTP.
#[derive(Clone)]
pub struct FeedClient {
    client: Client,
    feeds: FeedsConfig,
}

impl FeedClient {
    pub fn new(client: Client, feeds: FeedsConfig) -> Self {
        Self { client, feeds }
    }
}

#[async_trait::async_trait]
impl ResultSource for FeedClient {
    async fn fetch(&self, feed: Feed) -> Result<RunSequence, FetchError> {
        let url = feed.url(&self.feeds).to_string();
        tracing::debug!(%feed, %url, "Fetching results feed");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;
        let runs: RunSequence =
            serde_json::from_slice(&body).map_err(|source| FetchError::Decode { url: url.clone(), source })?;

        tracing::info!(%feed, runs = runs.len(), "Fetched results feed");
        Ok(runs)
    }
}
