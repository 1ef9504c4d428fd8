//! Posting replies to a Discord webhook.

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use crate::report::embed::Embed;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("webhook responded with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Webhook execute payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WebhookMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

pub async fn post(client: &Client, webhook_url: &str, message: &WebhookMessage) -> Result<(), DeliveryError> {
    let response = client.post(webhook_url).json(message).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DeliveryError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    tracing::info!(embeds = message.embeds.len(), "Delivered reply to webhook");
    Ok(())
}
