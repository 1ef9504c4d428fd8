use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use test262_bot::command::{Bot, CommandRequest, Reply};
use test262_bot::config::{BotConfig, LoggingConfig};
use test262_bot::discord::webhook::{self, WebhookMessage};
use test262_bot::report::embed::format_text;
use test262_bot::results::feed::Feed;

#[derive(Parser)]
#[command(
    name = "test262-bot",
    about = "Report LibJS test262 and LibWasm test result changes",
    version,
    long_about = None
)]
struct Cli {
    /// Path to the TOML configuration file (must exist when given)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the reply as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Post the reply to this Discord webhook
    #[arg(long, global = true, env = "DISCORD_WEBHOOK_URL")]
    webhook_url: Option<String>,

    /// Discord bot token used for the custom emoji lookup
    #[arg(long, global = true, env = "DISCORD_BOT_TOKEN", hide_env_values = true)]
    bot_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show LibJS test262 results for a commit (latest by default)
    Test262(ResultArgs),

    /// Show LibWasm spec test results for a commit (latest by default)
    Wasm(ResultArgs),

    /// List every result label and its icon
    Labels,

    /// Serve the commands over HTTP
    Serve {
        /// Bind address (defaults to the configured one)
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Args)]
struct ResultArgs {
    /// Serenity commit hash or prefix
    commit: Option<String>,

    /// Set to "show" to list the result labels instead
    #[arg(long)]
    labels: Option<String>,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    // Logs go to stderr so the reply on stdout stays parseable.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = BotConfig::resolve(cli.config.as_deref())?;
    if cli.webhook_url.is_some() {
        config.discord.webhook_url = cli.webhook_url.clone();
    }
    if cli.bot_token.is_some() {
        config.discord.bot_token = cli.bot_token.clone();
    }

    init_tracing(&config.logging);

    let request = match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            tracing::info!(%bind, "Starting test262-bot server");
            return test262_bot::serve(&config, &bind).await;
        }
        Commands::Test262(args) => result_request(Feed::Test262, args),
        Commands::Wasm(args) => result_request(Feed::Wasm, args),
        Commands::Labels => CommandRequest {
            labels: Some(test262_bot::command::SHOW_LABELS.to_string()),
            ..CommandRequest::latest(Feed::Test262)
        },
    };

    let client = config.http.build_client()?;
    let bot = Bot::with_client(&config, client.clone());
    let reply = bot
        .run(&request)
        .await
        .with_context(|| format!("{} command failed", request.feed))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&WebhookMessage::from(reply.clone()))?);
    } else {
        match &reply {
            Reply::Message(message) => println!("{}", message),
            Reply::Embed(embed) => print!("{}", format_text(embed)),
        }
    }

    if let Some(url) = &config.discord.webhook_url {
        webhook::post(&client, url, &WebhookMessage::from(reply))
            .await
            .context("failed to deliver reply to webhook")?;
    }

    Ok(())
}

fn result_request(feed: Feed, args: ResultArgs) -> CommandRequest {
    CommandRequest::new(feed, args.commit, args.labels)
}
