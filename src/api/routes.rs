//! API route definitions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use super::state::AppState;
use crate::command::CommandRequest;
use crate::discord::webhook::WebhookMessage;
use crate::results::feed::Feed;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/commands/{command}", get(run_command))
}

async fn health() -> Json<Value> {
    Json(json!({
        "data": {
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION")
        },
        "meta": {
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION")
        }
    }))
}

#[derive(Debug, Deserialize)]
struct CommandQuery {
    commit: Option<String>,
    labels: Option<String>,
}

async fn run_command(
    State(state): State<AppState>,
    Path(command): Path<String>,
    Query(query): Query<CommandQuery>,
) -> (StatusCode, Json<Value>) {
    let Ok(feed) = command.parse::<Feed>() else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("unknown command: {}", command) })),
        );
    };

    let request = CommandRequest::new(feed, query.commit, query.labels);

    match state.bot.run(&request).await {
        Ok(reply) => (StatusCode::OK, Json(json!({ "data": WebhookMessage::from(reply) }))),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            (StatusCode::BAD_GATEWAY, Json(json!({ "error": e.to_string() })))
        }
    }
}
