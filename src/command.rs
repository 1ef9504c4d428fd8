//! The `test262` / `wasm` command: fetch, resolve, look up, render.

use anyhow::Result;
use reqwest::Client;

use crate::config::BotConfig;
use crate::discord::webhook::WebhookMessage;
use crate::discord::{emoji_resolver, EmojiResolver};
use crate::github::{CommitLookup, GithubClient};
use crate::report::embed::Embed;
use crate::report::{error_embed, legend_embed, report_embed};
use crate::results::feed::{Feed, FeedClient, FetchError, ResultSource};
use crate::results::resolve::{resolve, ResolveError};

/// Value of the `labels` option that switches to the label legend.
pub const SHOW_LABELS: &str = "show";

/// One invocation of the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub feed: Feed,
    /// Prefix of the primary commit hash; latest run when absent.
    pub commit: Option<String>,
    pub labels: Option<String>,
}

impl CommandRequest {
    pub fn latest(feed: Feed) -> Self {
        Self {
            feed,
            commit: None,
            labels: None,
        }
    }

    /// An empty commit prefix means the latest run.
    pub fn new(feed: Feed, commit: Option<String>, labels: Option<String>) -> Self {
        Self {
            feed,
            commit: commit.filter(|c| !c.is_empty()),
            labels,
        }
    }

    pub fn wants_legend(&self) -> bool {
        self.labels.as_deref() == Some(SHOW_LABELS)
    }
}

/// What the command answers with.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Message(String),
    Embed(Embed),
}

impl From<Reply> for WebhookMessage {
    fn from(reply: Reply) -> Self {
        match reply {
            Reply::Message(content) => WebhookMessage {
                content: Some(content),
                embeds: Vec::new(),
            },
            Reply::Embed(embed) => WebhookMessage {
                content: None,
                embeds: vec![embed],
            },
        }
    }
}

pub struct Bot {
    results: Box<dyn ResultSource>,
    commits: Box<dyn CommitLookup>,
    emoji: Box<dyn EmojiResolver>,
}

impl Bot {
    pub fn new(
        results: Box<dyn ResultSource>,
        commits: Box<dyn CommitLookup>,
        emoji: Box<dyn EmojiResolver>,
    ) -> Self {
        Self { results, commits, emoji }
    }

    /// Wire the HTTP-backed collaborators from configuration.
    pub fn from_config(config: &BotConfig) -> Result<Self> {
        Ok(Self::with_client(config, config.http.build_client()?))
    }

    /// Like [`Bot::from_config`], sharing an existing client.
    pub fn with_client(config: &BotConfig, client: Client) -> Self {
        Self::new(
            Box::new(FeedClient::new(client.clone(), config.feeds.clone())),
            Box::new(GithubClient::new(client.clone(), &config.github)),
            emoji_resolver(client, &config.discord),
        )
    }

    /// Run the command. Only a failed feed fetch is an error; everything
    /// else is answered with a message or an error embed.
    #[tracing::instrument(skip(self), fields(feed = %request.feed, commit = ?request.commit))]
    pub async fn run(&self, request: &CommandRequest) -> Result<Reply, FetchError> {
        if request.wants_legend() {
            let icons = self.emoji.icons().await;
            return Ok(Reply::Embed(legend_embed(&icons)));
        }

        let feed = request.feed;
        let runs = self.results.fetch(feed).await?;

        let resolved = match resolve(&runs, request.commit.as_deref()) {
            Ok(resolved) => resolved,
            Err(ResolveError::NotFound { prefix }) => {
                tracing::info!(%prefix, "No run matches commit prefix");
                return Ok(Reply::Message(format!(
                    "Could not find a {} result for commit `{}`",
                    feed, prefix
                )));
            }
            Err(ResolveError::Empty) => {
                return Ok(Reply::Message(format!("No {} results have been published yet", feed)));
            }
        };

        let Some(sha) = resolved.target.primary_commit() else {
            return Ok(Reply::Embed(error_embed("The latest run does not record a serenity commit")));
        };

        let commit = match self.commits.lookup(sha).await {
            Ok(Some(commit)) => commit,
            Ok(None) => {
                return Ok(Reply::Embed(error_embed(format!("Could not find commit `{}` on GitHub", sha))));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Commit lookup failed");
                return Ok(Reply::Embed(error_embed(format!("Could not look up commit `{}`", sha))));
            }
        };

        let icons = self.emoji.icons().await;
        tracing::debug!(
            target_commit = %sha,
            baseline = ?resolved.previous.and_then(|run| run.primary_commit()),
            "Rendering report"
        );
        Ok(Reply::Embed(report_embed(feed, &resolved, &commit, &icons)))
    }
}
