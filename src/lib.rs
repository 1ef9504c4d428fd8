//! test262-bot -- chat command reporting LibJS test262 and LibWasm results.
//!
//! This crate fetches the published results feeds, picks a run by commit
//! prefix (or the latest one), diffs it against the run before it, and
//! renders the comparison as a Discord-style embed.

pub mod api;
pub mod command;
pub mod config;
pub mod discord;
pub mod github;
pub mod report;
pub mod results;

use anyhow::Result;

use crate::command::Bot;
use crate::config::BotConfig;

/// Serve the commands over HTTP until the process is stopped.
pub async fn serve(config: &BotConfig, bind: &str) -> Result<()> {
    let bot = Bot::from_config(config)?;
    let app = api::router(api::state::AppState::new(bot));

    let addr: std::net::SocketAddr = bind.parse()?;
    tracing::info!(%addr, "test262-bot listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
