//! End-to-end command runs with every collaborator mocked over HTTP.

use serde_json::{json, Value};
use test262_bot::command::{Bot, CommandRequest, Reply};
use test262_bot::config::BotConfig;
use test262_bot::report::embed::Embed;
use test262_bot::results::feed::{Feed, FetchError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Served verbatim so the label and group order reaches the client untouched.
const FEED_FIXTURE: &str = r#"
[
  {
    "commitTimestamp": 1690000000,
    "runTimestamp": 1690000900,
    "versions": { "serenity": "1111111aaaa", "test262": "9999999ffff" },
    "tests": {
      "test262": {
        "duration": 12.5,
        "results": { "total": 100, "passed": 60, "failed": 35, "timeout_error": 5 }
      }
    }
  },
  {
    "commitTimestamp": 1690100000,
    "runTimestamp": 1690100900,
    "versions": { "serenity": "2222222bbbb", "test262": "9999999ffff" },
    "tests": {
      "test262": {
        "duration": 10.0,
        "results": { "total": 150, "passed": 120, "failed": 30 }
      },
      "test262-bytecode": {
        "duration": 11.0,
        "results": { "total": 150, "passed": 110, "failed": 40 }
      }
    }
  }
]
"#;

fn commit_fixture(sha: &str) -> Value {
    json!({
        "sha": sha,
        "html_url": format!("https://github.com/SerenityOS/serenity/commit/{}", sha),
        "commit": { "message": "LibJS: Speed up everything\n\nDetails.", "author": { "name": "Jane Doe" } },
        "author": { "login": "jane", "avatar_url": "https://avatars.example/jane", "html_url": "https://github.com/jane" }
    })
}

async fn setup() -> (MockServer, BotConfig) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test262/results.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(FEED_FIXTURE, "application/json"))
        .mount(&server)
        .await;
    for sha in ["1111111aaaa", "2222222bbbb"] {
        Mock::given(method("GET"))
            .and(path(format!("/repos/SerenityOS/serenity/commits/{}", sha)))
            .respond_with(ResponseTemplate::new(200).set_body_json(commit_fixture(sha)))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/guilds/42/emojis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "7", "name": "yakslice" }])))
        .mount(&server)
        .await;

    let mut config = BotConfig::default();
    config.feeds.test262_url = format!("{}/test262/results.json", server.uri());
    config.feeds.wasm_url = format!("{}/wasm/results.json", server.uri());
    config.github.api_url = server.uri();
    config.discord.api_url = server.uri();
    config.discord.bot_token = Some("secret".to_string());
    config.discord.guild_id = Some("42".to_string());

    (server, config)
}

fn embed(reply: Reply) -> Embed {
    match reply {
        Reply::Embed(embed) => embed,
        Reply::Message(message) => panic!("expected embed, got message {:?}", message),
    }
}

#[tokio::test]
async fn test_latest_run_report() {
    let (_server, config) = setup().await;
    let bot = Bot::from_config(&config).unwrap();

    let embed = embed(bot.run(&CommandRequest::latest(Feed::Test262)).await.unwrap());

    assert_eq!(embed.title.as_deref(), Some("LibJS test262 results"));
    assert_eq!(embed.author.as_ref().unwrap().name, "Jane Doe");
    assert_eq!(embed.fields.len(), 2);

    assert_eq!(embed.fields[0].name, "test262 (10.00s) (-2.50s)");
    assert_eq!(
        embed.fields[0].value,
        "✅ 80.00% (+20.00) | 🎉 150 (+50) | ✔️ 120 (+60) | ❌ 30 (-5) | 💀 0 (-5)"
    );

    assert_eq!(embed.fields[1].name, "test262-bytecode (11.00s) (+11.00s)");
    assert_eq!(
        embed.fields[1].value,
        "✅ 73.33% (+73.33) | 🎉 150 (+150) | ✔️ 110 (+110) | ❌ 40 (+40)"
    );

    let description = embed.description.unwrap();
    assert!(description.starts_with("**LibJS: Speed up everything**"));
    assert!(description.contains("Compared to: [`1111111`]"));
}

#[tokio::test]
async fn test_first_run_by_prefix_has_no_baseline() {
    let (_server, config) = setup().await;
    let bot = Bot::from_config(&config).unwrap();

    let request = CommandRequest {
        commit: Some("1111".to_string()),
        ..CommandRequest::latest(Feed::Test262)
    };
    let embed = embed(bot.run(&request).await.unwrap());

    assert_eq!(embed.fields.len(), 1);
    assert_eq!(embed.fields[0].name, "test262 (12.50s) (+12.50s)");
    assert_eq!(
        embed.fields[0].value,
        "✅ 60.00% (+60.00) | 🎉 100 (+100) | ✔️ 60 (+60) | ❌ 35 (+35) | 💀 5 (+5)"
    );
    assert!(!embed.description.unwrap().contains("Compared to"));
}

#[tokio::test]
async fn test_unknown_prefix() {
    let (_server, config) = setup().await;
    let bot = Bot::from_config(&config).unwrap();

    let request = CommandRequest {
        commit: Some("deadbeef".to_string()),
        ..CommandRequest::latest(Feed::Test262)
    };
    let reply = bot.run(&request).await.unwrap();
    assert_eq!(
        reply,
        Reply::Message("Could not find a test262 result for commit `deadbeef`".to_string())
    );
}

#[tokio::test]
async fn test_legend_uses_custom_emoji() {
    let (_server, config) = setup().await;
    let bot = Bot::from_config(&config).unwrap();

    let request = CommandRequest {
        labels: Some("show".to_string()),
        ..CommandRequest::latest(Feed::Wasm)
    };
    let embed = embed(bot.run(&request).await.unwrap());
    assert!(embed.description.unwrap().contains("<:yakslice:7> todo_error"));
}

#[tokio::test]
async fn test_missing_feed_is_a_fetch_failure() {
    let (_server, config) = setup().await;
    let bot = Bot::from_config(&config).unwrap();

    let err = bot.run(&CommandRequest::latest(Feed::Wasm)).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}
