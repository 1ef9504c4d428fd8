//! Chat platform collaborators: custom emoji lookup and webhook delivery.

pub mod webhook;

use reqwest::Client;
use serde::Deserialize;

use crate::config::DiscordConfig;
use crate::report::labels::Icons;

/// Resolves the icons that live on the chat platform.
#[async_trait::async_trait]
pub trait EmojiResolver: Send + Sync {
    async fn icons(&self) -> Icons;
}

/// Always answers with the configured fallback.
pub struct StaticEmoji {
    fallback: String,
}

impl StaticEmoji {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
        }
    }
}

#[async_trait::async_trait]
impl EmojiResolver for StaticEmoji {
    async fn icons(&self) -> Icons {
        Icons::new(self.fallback.clone())
    }
}

#[derive(Debug, Deserialize)]
struct GuildEmoji {
    id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    animated: bool,
}

impl GuildEmoji {
    /// Message markup, e.g. `<:yakslice:1234>`.
    fn markup(&self) -> Option<String> {
        let id = self.id.as_deref()?;
        let name = self.name.as_deref()?;
        let prefix = if self.animated { "a" } else { "" };
        Some(format!("<{}:{}:{}>", prefix, name, id))
    }
}

/// Looks the custom emoji up in a guild's emoji list.
pub struct GuildEmojiResolver {
    client: Client,
    api_url: String,
    guild_id: String,
    bot_token: String,
    emoji_name: String,
    fallback: String,
}

impl GuildEmojiResolver {
    /// `None` unless both a bot token and a guild are configured.
    pub fn from_config(client: Client, config: &DiscordConfig) -> Option<Self> {
        Some(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            guild_id: config.guild_id.clone()?,
            bot_token: config.bot_token.clone()?,
            emoji_name: config.custom_emoji.clone(),
            fallback: config.custom_emoji_fallback.clone(),
        })
    }

    async fn find(&self) -> Result<Option<String>, reqwest::Error> {
        let url = format!("{}/guilds/{}/emojis", self.api_url, self.guild_id);
        let emojis: Vec<GuildEmoji> = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Bot {}", self.bot_token))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(emojis
            .iter()
            .find(|emoji| emoji.name.as_deref() == Some(self.emoji_name.as_str()))
            .and_then(GuildEmoji::markup))
    }
}

#[async_trait::async_trait]
impl EmojiResolver for GuildEmojiResolver {
    async fn icons(&self) -> Icons {
        match self.find().await {
            Ok(Some(markup)) => Icons::new(markup),
            Ok(None) => {
                tracing::warn!(emoji = %self.emoji_name, "Custom emoji not found in guild, using fallback");
                Icons::new(self.fallback.clone())
            }
            Err(e) => {
                tracing::warn!(emoji = %self.emoji_name, error = %e, "Custom emoji lookup failed, using fallback");
                Icons::new(self.fallback.clone())
            }
        }
    }
}

/// The live resolver when the platform is configured, the fallback otherwise.
pub fn emoji_resolver(client: Client, config: &DiscordConfig) -> Box<dyn EmojiResolver> {
    match GuildEmojiResolver::from_config(client, config) {
        Some(resolver) => Box::new(resolver),
        None => {
            tracing::debug!("No Discord bot token or guild configured, custom emoji disabled");
            Box::new(StaticEmoji::new(config.custom_emoji_fallback.clone()))
        }
    }
}
