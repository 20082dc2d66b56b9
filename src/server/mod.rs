//! HTTP scoring endpoint
//!
//! Stateless: every request is scored against the configured target with the
//! same `core::score` the front ends use. The target never leaves the server.

use crate::core::{Word, WordError, score};
use crate::protocol::ErrorResponse;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::Value;
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, warn};

const INVALID_BODY: &str = "Invalid request body";
const INVALID_LENGTH: &str = "Enter a 5-letter word";
const INVALID_CHARACTERS: &str = "Word must contain only letters";

const CORS_HEADERS: [(header::HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

struct ServerState {
    target: Word,
}

/// Build the endpoint's router
pub fn router(target: Word) -> Router {
    let state = Arc::new(ServerState { target });

    Router::new()
        .route("/", post(score_word).options(preflight))
        .route("/score", post(score_word).options(preflight))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Serve the endpoint on `addr` until Ctrl-C
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, target: Word) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "scoring endpoint listening");

    axum::serve(listener, router(target))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("scoring endpoint stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

fn format_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, CORS_HEADERS, Json(body)).into_response()
}

fn bad_request(message: &str) -> Response {
    format_response(StatusCode::BAD_REQUEST, &ErrorResponse::new(message))
}

/// Non-empty `word` at the top level, else `word` inside a nested `body`
fn extract_word(payload: &Value) -> &str {
    payload
        .get("word")
        .and_then(Value::as_str)
        .filter(|word| !word.is_empty())
        .or_else(|| {
            payload
                .get("body")
                .and_then(|b| b.get("word"))
                .and_then(Value::as_str)
        })
        .unwrap_or_default()
}

async fn score_word(State(state): State<Arc<ServerState>>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(error) => {
            warn!(%error, "unparseable scoring request");
            return bad_request(INVALID_BODY);
        }
    };

    let guess = match Word::new(extract_word(&payload)) {
        Ok(guess) => guess,
        Err(WordError::InvalidLength(len)) => {
            info!(len, "rejected guess with wrong length");
            return bad_request(INVALID_LENGTH);
        }
        Err(WordError::InvalidCharacters) => {
            info!("rejected guess with non-letter characters");
            return bad_request(INVALID_CHARACTERS);
        }
    };

    let outcome = score(&guess, &state.target);
    info!(guess = %guess, correct = outcome.is_correct(), "scored guess");
    format_response(StatusCode::OK, &outcome)
}

async fn preflight() -> Response {
    (StatusCode::NO_CONTENT, CORS_HEADERS).into_response()
}

async fn healthz() -> &'static str {
    "ok"
}
